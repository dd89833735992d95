//! Interactive session state.
//!
//! A [`Session`] owns the text being edited and at most one current
//! [`TextStats`]. Each successful analysis replaces the result wholesale;
//! a failed action leaves both the buffer and the result untouched.

use camino::Utf8Path;

use crate::error::{SessionError, SessionResult};
use crate::files;
use crate::report;
use crate::stats::{self, TextStats};

/// Text buffer plus the single active analysis result.
#[derive(Debug, Default, Clone)]
pub struct Session {
    text: String,
    current: Option<TextStats>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text buffer. The current result is kept.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append `line` and a line feed to the text buffer.
    pub fn append_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// The current result, if any text has been analyzed since the last clear.
    pub const fn current(&self) -> Option<&TextStats> {
        self.current.as_ref()
    }

    /// Load a `.txt` file into the text buffer.
    ///
    /// # Errors
    ///
    /// Propagates [`files::load_text_file`] failures; the buffer is unchanged.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn open(&mut self, path: &Utf8Path, max_bytes: Option<usize>) -> SessionResult<()> {
        self.text = files::load_text_file(path, max_bytes)?;
        tracing::info!(bytes = self.text.len(), "file loaded into session");
        Ok(())
    }

    /// Analyze the text buffer and make the result current.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Analysis`] for an empty buffer; the previous
    /// result is kept.
    #[tracing::instrument(skip_all)]
    pub fn analyze(&mut self) -> SessionResult<&TextStats> {
        let stats = stats::analyze(&self.text)?;
        Ok(&*self.current.insert(stats))
    }

    /// Render the current result.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoResult`] when nothing has been analyzed.
    pub fn report(&self, top: usize) -> SessionResult<String> {
        self.current
            .as_ref()
            .map(|stats| report::format_report(stats, top))
            .ok_or(SessionError::NoResult)
    }

    /// Save the current report to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoResult`] when nothing has been analyzed, or
    /// [`SessionError::File`] when writing fails.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn save(&self, path: &Utf8Path, top: usize) -> SessionResult<()> {
        let rendered = self.report(top)?;
        files::save_report(path, &rendered)?;
        tracing::info!("report saved");
        Ok(())
    }

    /// Empty the buffer and drop the current result.
    pub fn clear(&mut self) {
        self.text.clear();
        self.current = None;
    }
}
