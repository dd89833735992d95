//! Core library for wordtally.
//!
//! This crate provides the text analysis engine used by the `wordtally`
//! CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`stats`] - The analyzer and its [`TextStats`] result
//! - [`text`] - Whitespace, sentence, and paragraph splitting
//! - [`frequency`] - Word frequency counting and ranking
//! - [`report`] - Plain-text report rendering
//! - [`files`] - `.txt` loading and report saving
//! - [`session`] - Text buffer plus the current result
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use wordtally_core::{analyze, format_report, DEFAULT_TOP_WORDS};
//!
//! let stats = analyze("a a a b b c").expect("text is not empty");
//! assert_eq!(stats.word_count, 6);
//!
//! let report = format_report(&stats, DEFAULT_TOP_WORDS);
//! assert!(report.contains("1. a: 3 times"));
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod files;
pub mod frequency;
pub mod report;
pub mod session;
pub mod stats;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, FileError, FileResult,
    SessionError, SessionResult,
};
pub use files::DEFAULT_MAX_INPUT_BYTES;
pub use frequency::RankedWord;
pub use report::{DEFAULT_TOP_WORDS, Report, format_report};
pub use session::Session;
pub use stats::{TextStats, analyze, analyze_optional};
