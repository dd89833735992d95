//! Info command: the analysis settings in effect and where they came from.

use std::io::Write;

use camino::Utf8Path;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};
use wordtally_core::config::{Config, ConfigSources};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

/// What `info --json` prints.
#[derive(Debug, Serialize)]
struct Settings<'a> {
    name: &'static str,
    version: &'static str,
    analysis: Analysis,
    logging: Logging<'a>,
    /// Merged files, lowest precedence first.
    config_files: Vec<&'a Utf8Path>,
}

#[derive(Debug, Serialize)]
struct Analysis {
    top_words: usize,
    /// `None` when the limit is disabled.
    max_input_bytes: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Logging<'a> {
    level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dir: Option<&'a Utf8Path>,
}

impl<'a> Settings<'a> {
    fn collect(config: &'a Config, sources: &'a ConfigSources) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            analysis: Analysis {
                top_words: config.top_words,
                max_input_bytes: config.input_limit(),
            },
            logging: Logging {
                level: config.log_level.as_str(),
                dir: config.log_dir.as_deref(),
            },
            config_files: sources.files().collect(),
        }
    }

    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let label = |s: &'static str| s.if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string();

        writeln!(
            out,
            "{} {}",
            self.name.if_supports_color(Stream::Stdout, |s| s.bold()),
            self.version.if_supports_color(Stream::Stdout, |s| s.green())
        )?;
        writeln!(out)?;
        writeln!(out, "{}: {}", label("Top words"), self.analysis.top_words)?;
        match self.analysis.max_input_bytes {
            Some(limit) => writeln!(out, "{}: {limit} bytes", label("Input limit"))?,
            None => writeln!(out, "{}: disabled", label("Input limit"))?,
        }
        writeln!(out, "{}: {}", label("Log level"), self.logging.level)?;
        if let Some(dir) = self.logging.dir {
            writeln!(out, "{}: {dir}", label("Log directory"))?;
        }
        if self.config_files.is_empty() {
            writeln!(out, "{}: none (built-in defaults)", label("Config files"))?;
        } else {
            writeln!(out, "{}:", label("Config files"))?;
            for path in &self.config_files {
                writeln!(out, "  {path}")?;
            }
        }
        Ok(())
    }
}

/// Print the effective settings.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let settings = Settings::collect(config, sources);
    debug!(
        json = global_json,
        files = settings.config_files.len(),
        "executing info command"
    );

    if global_json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        settings.write_text(&mut std::io::stdout().lock())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(config: &Config, sources: &ConfigSources) -> String {
        let mut out = Vec::new();
        Settings::collect(config, sources)
            .write_text(&mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn defaults_render_without_files() {
        let text = render(&Config::default(), &ConfigSources::default());
        assert!(text.contains("Top words: 10"));
        assert!(text.contains("Input limit: 5242880 bytes"));
        assert!(text.contains("none (built-in defaults)"));
    }

    #[test]
    fn disabled_limit_is_null_in_json() {
        let config = Config {
            disable_input_limit: true,
            top_words: 3,
            ..Config::default()
        };
        let sources = ConfigSources::default();
        let json = serde_json::to_value(Settings::collect(&config, &sources)).unwrap();
        assert_eq!(json["analysis"]["top_words"], 3);
        assert!(json["analysis"]["max_input_bytes"].is_null());
        assert!(json["logging"].get("dir").is_none());
    }

    #[test]
    fn config_files_listed_in_merge_order() {
        let sources = ConfigSources {
            user_file: Some("/home/u/.config/wordtally/config.toml".into()),
            project_files: vec!["/work/.wordtally.yaml".into()],
            explicit_files: Vec::new(),
        };
        let text = render(&Config::default(), &sources);
        let user = text.find("config.toml").unwrap();
        let project = text.find(".wordtally.yaml").unwrap();
        assert!(user < project);
    }
}
