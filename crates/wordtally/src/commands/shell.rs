//! Shell command: a line-oriented session over a text buffer.
//!
//! Plain lines are appended to the buffer. Lines starting with `:` are
//! commands; `::` escapes a literal leading colon. Every failure is
//! reported on the output stream and the loop keeps going.

use std::io::{BufRead, Write};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument, warn};

use wordtally_core::{Session, SessionError, format_report};

const HELP: &str = "\
Commands:
  :open PATH   load a .txt file into the buffer
  :analyze     analyze the buffer and print the report
  :save PATH   save the last report to a file
  :show        print the last report again
  :text        print the buffer
  :clear       empty the buffer and forget the last result
  :help        show this help
  :quit        leave the shell
Any other line is appended to the buffer. Start a line with `::` to
append text beginning with a colon.";

/// Arguments for the `shell` subcommand.
#[derive(Args, Debug, Default)]
pub struct ShellArgs {
    /// `.txt` file to load before the first prompt.
    pub file: Option<Utf8PathBuf>,
}

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Text(&'a str),
    Open(&'a str),
    Analyze,
    Save(&'a str),
    Show,
    ShowText,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Line<'a> {
    fn parse(line: &'a str) -> Self {
        if line.starts_with("::") {
            return Self::Text(&line[1..]);
        }
        let Some(command) = line.strip_prefix(':') else {
            return Self::Text(line);
        };
        let (name, arg) = command
            .trim()
            .split_once(char::is_whitespace)
            .map_or((command.trim(), ""), |(n, a)| (n, a.trim()));
        match name {
            "open" | "o" => Self::Open(arg),
            "analyze" | "a" => Self::Analyze,
            "save" | "s" => Self::Save(arg),
            "show" => Self::Show,
            "text" | "t" => Self::ShowText,
            "clear" | "c" => Self::Clear,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(name),
        }
    }
}

/// Run the shell on stdin and stdout.
#[instrument(name = "cmd_shell", skip_all)]
pub fn cmd_shell(args: ShellArgs, top: usize, max_input: Option<usize>) -> anyhow::Result<()> {
    debug!(file = ?args.file, top, "executing shell command");

    let mut session = Session::new();
    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    if let Some(ref path) = args.file {
        open(&mut session, &mut stdout, path.as_str(), max_input)?;
    }
    writeln!(stdout, "Type or paste text. Enter :help for commands.")
        .context("failed to write to stdout")?;

    run_shell(&mut session, stdin, &mut stdout, top, max_input)
}

/// Drive `session` from `input` until EOF or `:quit`.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    top: usize,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        match Line::parse(&line) {
            Line::Text(text) => session.append_line(text),
            Line::Open(path) => open(session, out, path, max_input)?,
            Line::Analyze => match session.analyze() {
                Ok(stats) => {
                    write!(out, "{}", format_report(stats, top))?;
                    status(out, "Analysis completed successfully")?;
                }
                Err(err) => failure(out, "Analysis failed", &err)?,
            },
            Line::Save(path) if path.is_empty() => {
                failure(out, "Save failed", &"usage: :save PATH")?;
            }
            Line::Save(path) => match session.save(Utf8Path::new(path), top) {
                Ok(()) => status(out, &format!("Results saved to: {path}"))?,
                Err(err) => failure(out, "Save failed", &err)?,
            },
            Line::Show => match session.report(top) {
                Ok(report) => write!(out, "{report}")?,
                Err(err) => failure(out, "Nothing to show", &err)?,
            },
            Line::ShowText => {
                write!(out, "{}", session.text())?;
                if !session.text().is_empty() && !session.text().ends_with('\n') {
                    writeln!(out)?;
                }
            }
            Line::Clear => {
                session.clear();
                status(out, "All cleared - ready for new input")?;
            }
            Line::Help => writeln!(out, "{HELP}")?,
            Line::Quit => break,
            Line::Unknown(name) => {
                warn!(command = name, "unknown shell command");
                failure(out, "Unknown command", &format!(":{name} (try :help)"))?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn open<W: Write>(
    session: &mut Session,
    out: &mut W,
    path: &str,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    if path.is_empty() {
        return failure(out, "Failed to open file", &"usage: :open PATH");
    }
    match session.open(Utf8Path::new(path), max_input) {
        Ok(()) => status(out, &format!("File loaded: {path}")),
        Err(SessionError::File(err)) if err.is_invalid_file() => {
            failure(out, "Invalid file", &err)
        }
        Err(err) => failure(out, "Failed to open file", &err),
    }
}

fn status<W: Write>(out: &mut W, message: &str) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} {message}",
        "OK:".if_supports_color(Stream::Stdout, |s| s.green())
    )?;
    Ok(())
}

fn failure<W: Write>(
    out: &mut W,
    context: &str,
    err: &dyn std::fmt::Display,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} {context}: {err}",
        "ERROR:".if_supports_color(Stream::Stdout, |s| s.red())
    )?;
    Ok(())
}
