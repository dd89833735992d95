//! Analyze command: statistics and word ranking for one input.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use wordtally_core::frequency::RankedWord;
use wordtally_core::{TextStats, files, format_report, stats};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// `.txt` file to analyze. Reads stdin when omitted or `-`.
    #[arg(conflicts_with = "text")]
    pub file: Option<Utf8PathBuf>,

    /// Analyze this text instead of a file.
    #[arg(short, long)]
    pub text: Option<String>,

    /// Number of ranked words to list (overrides config).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Also save the report to FILE.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

/// JSON shape of an analysis: the statistics plus the ranked words.
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput<'a> {
    /// Counts and the full frequency map.
    #[serde(flatten)]
    pub stats: &'a TextStats,
    /// The highest-ranked words.
    pub top_words: Vec<RankedWord>,
}

impl<'a> AnalyzeOutput<'a> {
    /// Pair `stats` with its top `top` words.
    pub fn new(stats: &'a TextStats, top: usize) -> Self {
        Self {
            stats,
            top_words: stats.top_words(top),
        }
    }
}

/// Analyze a file, inline text, or stdin and print the report.
#[instrument(name = "cmd_analyze", skip_all, fields(source))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config_top: usize,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let top = args.top.unwrap_or(config_top);
    let (source, text) = read_input(&args, max_input)?;
    tracing::Span::current().record("source", source.as_str());
    debug!(%source, top, bytes = text.len(), "executing analyze command");

    let stats = stats::analyze(&text)?;
    let report = format_report(&stats, top);

    if global_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&AnalyzeOutput::new(&stats, top))?
        );
    } else {
        print!("{report}");
    }

    if let Some(ref path) = args.output {
        files::save_report(path, &report)
            .with_context(|| format!("failed to save report to {path}"))?;
        eprintln!("{} report saved to {}", "SAVED:".green().bold(), path);
    }

    Ok(())
}

/// Resolve the input text and a label naming where it came from.
fn read_input(args: &AnalyzeArgs, max_input: Option<usize>) -> anyhow::Result<(String, String)> {
    if let Some(ref text) = args.text {
        super::check_input_size("--text", text, max_input)?;
        return Ok(("--text".to_string(), text.clone()));
    }
    match args.file {
        Some(ref path) if path.as_str() != "-" => {
            let text = files::load_text_file(path, max_input)
                .with_context(|| format!("failed to read {path}"))?;
            Ok((path.to_string(), text))
        }
        _ => Ok(("stdin".to_string(), super::read_stdin(max_input)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_wins() {
        let args = AnalyzeArgs {
            text: Some("one two".to_string()),
            ..Default::default()
        };
        let (source, text) = read_input(&args, None).unwrap();
        assert_eq!(source, "--text");
        assert_eq!(text, "one two");
    }

    #[test]
    fn inline_text_respects_limit() {
        let args = AnalyzeArgs {
            text: Some("one two".to_string()),
            ..Default::default()
        };
        assert!(read_input(&args, Some(3)).is_err());
    }

    #[test]
    fn file_input_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("in.txt")).unwrap();
        std::fs::write(&path, "Hello there.\n").unwrap();

        let args = AnalyzeArgs {
            file: Some(path.clone()),
            ..Default::default()
        };
        let (source, text) = read_input(&args, None).unwrap();
        assert_eq!(source, path.as_str());
        assert_eq!(text, "Hello there.\n");
    }

    #[test]
    fn json_output_includes_ranking() {
        let stats = stats::analyze("b a b").unwrap();
        let value = serde_json::to_value(AnalyzeOutput::new(&stats, 1)).unwrap();
        assert_eq!(value["word_count"], 3);
        assert_eq!(value["top_words"][0]["word"], "b");
        assert_eq!(value["top_words"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_text_is_an_error() {
        let args = AnalyzeArgs {
            text: Some("   ".to_string()),
            ..Default::default()
        };
        let err = cmd_analyze(args, false, 10, None).unwrap_err();
        assert!(err.to_string().contains("Text cannot be empty"));
    }
}
