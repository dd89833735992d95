//! Logging setup for the binary.
//!
//! Human-readable logs go to stderr, filtered by `-q`/`-v` (or `RUST_LOG`).
//! When a log file is configured, JSON lines are also written there through
//! a non-blocking appender, filtered by the configured log level.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Explicit log file path, taking precedence over any log directory.
const ENV_LOG_PATH: &str = "WORDTALLY_LOG_PATH";

/// File name used inside a log directory.
const LOG_FILE_NAME: &str = "wordtally.jsonl";

/// Where and how verbosely to log.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// JSONL log file, if file logging is enabled.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from `WORDTALLY_LOG_PATH`, falling back to
    /// `log_dir` (already merged from config and `WORDTALLY_LOG_DIR`).
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        let log_file = std::env::var_os(ENV_LOG_PATH)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| log_dir.map(|dir| dir.join(LOG_FILE_NAME)));
        Self { log_file }
    }
}

/// Keeps the non-blocking writer alive; logs are flushed on drop.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Filter for stderr output. `RUST_LOG` wins over the flags.
pub fn console_filter(quiet: bool, verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        EnvFilter::new(level)
    })
}

/// Filter for the log file. `RUST_LOG` wins, then `-q`/`-v`, then the
/// configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => default_level,
                1 => "debug",
                _ => "trace",
            }
        };
        EnvFilter::new(level)
    })
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    console: EnvFilter,
    file: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console);

    let (file_layer, guard) = match config.log_file {
        Some(ref path) => {
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(&dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(file);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(ObservabilityGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dir_gets_default_file_name() {
        if std::env::var_os(ENV_LOG_PATH).is_some() {
            return;
        }
        let config = ObservabilityConfig::from_env_with_overrides(Some(PathBuf::from("/tmp/wt")));
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("/tmp/wt").join(LOG_FILE_NAME))
        );
    }

    #[test]
    fn no_log_dir_means_no_file() {
        if std::env::var_os(ENV_LOG_PATH).is_some() {
            return;
        }
        let config = ObservabilityConfig::from_env_with_overrides(None);
        assert!(config.log_file.is_none());
    }
}
