//! Loading text files and saving reports.
//!
//! Only `.txt` files are accepted as input. Every line ending (`\r\n`,
//! `\n`, or a lone `\r`) loads as `\n`, and the last line is terminated
//! too. Reports are written verbatim with no extension check.

use camino::Utf8Path;

use crate::error::{FileError, FileResult};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Required (case-insensitive) suffix for loadable files.
const TEXT_EXTENSION: &str = ".txt";

/// Whether `path` names a `.txt` file (case-insensitive).
pub fn has_text_extension(path: &Utf8Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_lowercase().ends_with(TEXT_EXTENSION))
}

/// Load a `.txt` file.
///
/// # Errors
///
/// - [`FileError::NotFound`] when `path` does not exist.
/// - [`FileError::UnsupportedExtension`] when the name does not end in `.txt`.
/// - [`FileError::TooLarge`] when the file exceeds `max_bytes`.
/// - [`FileError::Io`] when reading fails, including invalid UTF-8.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_text_file(path: &Utf8Path, max_bytes: Option<usize>) -> FileResult<String> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if !has_text_extension(path) {
        return Err(FileError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    let io_err = |source| FileError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(path.as_std_path()).map_err(io_err)?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(FileError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let raw = std::fs::read_to_string(path.as_std_path()).map_err(io_err)?;
    let content = normalize_line_endings(&raw);

    tracing::debug!(bytes = content.len(), "loaded text file");
    Ok(content)
}

/// Rewrite CRLF and lone CR as LF and make sure non-empty text ends in LF.
fn normalize_line_endings(raw: &str) -> String {
    let mut content = String::with_capacity(raw.len() + 1);
    for line in raw.replace("\r\n", "\n").replace('\r', "\n").lines() {
        content.push_str(line);
        content.push('\n');
    }
    content
}

/// Write `report` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`FileError::Io`] when the file cannot be written.
#[tracing::instrument(skip_all, fields(path = %path, bytes = report.len()))]
pub fn save_report(path: &Utf8Path, report: &str) -> FileResult<()> {
    std::fs::write(path.as_std_path(), report).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("saved report");
    Ok(())
}
