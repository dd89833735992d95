//! Command implementations.

use std::io::Read;

use anyhow::{Context, bail};

pub mod analyze;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod shell;

/// Reject `text` when it exceeds the configured limit.
pub fn check_input_size(source: &str, text: &str, max_bytes: Option<usize>) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && text.len() > max
    {
        bail!(
            "input too large: {source} is {} bytes (limit: {max} bytes)",
            text.len()
        );
    }
    Ok(())
}

/// Read all of stdin, stopping one byte past the size limit.
pub fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    read_bounded("stdin", std::io::stdin().lock(), max_bytes)
}

fn read_bounded(source: &str, reader: impl Read, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let cap = max_bytes.map_or(u64::MAX, |max| (max as u64).saturating_add(1));
    let mut content = String::new();
    reader
        .take(cap)
        .read_to_string(&mut content)
        .with_context(|| format!("failed to read {source}"))?;
    check_input_size(source, &content, max_bytes)?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_within_limit_passes() {
        assert!(check_input_size("text", "abc", Some(3)).is_ok());
        assert!(check_input_size("text", "abc", None).is_ok());
    }

    #[test]
    fn input_over_limit_fails() {
        let err = check_input_size("text", "abcd", Some(3)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn bounded_read_stops_past_limit() {
        let err = read_bounded("pipe", &b"abcdef"[..], Some(3)).unwrap_err();
        assert!(err.to_string().contains("pipe is 4 bytes"));
    }

    #[test]
    fn bounded_read_accepts_largest_limit() {
        let text = read_bounded("pipe", &b"words here"[..], Some(usize::MAX)).unwrap();
        assert_eq!(text, "words here");
        assert_eq!(read_bounded("pipe", &b"x"[..], None).unwrap(), "x");
    }
}
