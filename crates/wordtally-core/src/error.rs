//! Error types for wordtally-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input text is absent or contains only whitespace.
    #[error("Text cannot be empty!")]
    EmptyInput,
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised by the text file load and report save collaborators.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file to load does not exist.
    #[error("File does not exist: {path}")]
    NotFound {
        /// Path that was requested.
        path: Utf8PathBuf,
    },

    /// The file to load is not a `.txt` file.
    #[error("Only .txt files are supported: {path}")]
    UnsupportedExtension {
        /// Path that was requested.
        path: Utf8PathBuf,
    },

    /// The file exceeds the configured input size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Size of the file on disk.
        size: u64,
        /// Configured limit.
        limit: usize,
    },

    /// Reading or writing failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path being read or written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// Whether this error means the file was rejected before any I/O.
    ///
    /// Both a missing file and a wrong extension count as an invalid file.
    pub const fn is_invalid_file(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::UnsupportedExtension { .. })
    }
}

/// Result type alias using [`FileError`].
pub type FileResult<T> = Result<T, FileError>;

/// Errors surfaced by a [`Session`](crate::session::Session) action.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Analysis of the current buffer failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Loading or saving a file failed.
    #[error(transparent)]
    File(#[from] FileError),

    /// A report was requested before any text was analyzed.
    #[error("No analysis results. Please analyze text first.")]
    NoResult,
}

/// Result type alias using [`SessionError`].
pub type SessionResult<T> = Result<T, SessionError>;
