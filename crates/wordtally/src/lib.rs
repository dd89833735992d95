//! Argument definitions and commands for the `wordtally` binary.
//!
//! [`command()`] is what `xtask` renders into man pages and shell
//! completions; `main.rs` only parses a [`Cli`] and dispatches.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use std::path::PathBuf;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, CommandFactory, Parser, Subcommand};
use wordtally_core::LogLevel;
use wordtally_core::config::{Config, ConfigLoader, ConfigSources};

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                        Log filter (e.g., debug, wordtally=trace)
    WORDTALLY_LOG_PATH              Explicit log file path
    WORDTALLY_LOG_DIR               Log directory
    WORDTALLY_TOP_WORDS             Ranked words per report
    WORDTALLY_MAX_INPUT_BYTES       Input size limit in bytes
    WORDTALLY_DISABLE_INPUT_LIMIT   Set to true to accept any input size
";

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when the stream is a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Set the process-wide owo-colors override. `Auto` leaves detection on.
    pub fn apply(self) {
        let forced = match self {
            Self::Auto => return,
            Self::Always => true,
            Self::Never => false,
        };
        owo_colors::set_override(forced);
    }
}

/// Word, character, sentence, and paragraph statistics for plain text.
#[derive(Parser)]
#[command(name = "wordtally", version, long_about = None)]
#[command(arg_required_else_help = true, after_long_help = ENV_HELP)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Flags accepted by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by all subcommands.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Merge FILE over discovered config files
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before doing anything else
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Print errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print more detail on stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log file level (overrides config)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    /// Apply `--chdir`, then merge configuration as seen from the new
    /// working directory with `--config` on top.
    ///
    /// # Errors
    ///
    /// Fails when the directory change fails, a path is not UTF-8, or a
    /// config file cannot be parsed.
    pub fn load_config(&self) -> anyhow::Result<(Config, ConfigSources)> {
        if let Some(ref dir) = self.chdir {
            std::env::set_current_dir(dir)
                .with_context(|| format!("failed to change directory to {}", dir.display()))?;
        }
        let cwd = std::env::current_dir().context("failed to determine current directory")?;

        let mut loader = ConfigLoader::new().with_project_search(utf8(cwd, "current directory")?);
        if let Some(ref file) = self.config {
            loader = loader.with_file(utf8(file.clone(), "config path")?);
        }
        loader.load().context("failed to load configuration")
    }
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow::anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Count words, characters, sentences, and paragraphs
    Analyze(commands::analyze::AnalyzeArgs),

    /// Interactive session: type text, then analyze, save, or clear
    Shell(commands::shell::ShellArgs),

    /// Show the effective analysis settings
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The clap command tree, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["wordtally", "analyze", "--json", "-vv", "--text", "x"])
            .unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Analyze(_))));
    }
}
