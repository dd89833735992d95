//! Text splitting primitives.
//!
//! Provides the whitespace tokenizer, character counting, and the
//! delimiter-based sentence and paragraph splits used by [`crate::stats`].

use regex::Regex;
use std::sync::LazyLock;

/// Runs of sentence-ending punctuation.
static SENTENCE_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Runs of two or more line feeds.
static PARAGRAPH_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

/// Whether `ch` belongs to the whitespace class used for counting.
///
/// Space, tab, line feed, carriage return, vertical tab, and form feed.
pub const fn is_whitespace_class(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Count characters (Unicode scalar values), whitespace included.
pub fn count_characters(text: &str) -> usize {
    text.chars().count()
}

/// Count characters outside the whitespace class.
pub fn count_non_whitespace(text: &str) -> usize {
    text.chars().filter(|&c| !is_whitespace_class(c)).count()
}

/// Split text on runs of whitespace. Punctuation stays attached.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_whitespace_class).filter(|w| !w.is_empty())
}

/// Count whitespace-delimited tokens.
pub fn count_words(text: &str) -> usize {
    split_words(text).count()
}

/// Split text into sentence segments on runs of `.`, `!`, `?`.
///
/// Trailing empty segments are dropped; a leading empty segment is kept.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<&str> {
    split_segments(text, &SENTENCE_DELIMITERS)
}

/// Split text into paragraph segments on runs of two or more line feeds.
///
/// Same trailing-segment policy as [`split_sentences`].
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    split_segments(text, &PARAGRAPH_BREAKS)
}

/// Number of sentence segments, or 0 when none has visible content.
pub fn count_sentences(text: &str) -> usize {
    count_segments(&split_sentences(text))
}

/// Number of paragraph segments, or 0 when none has visible content.
pub fn count_paragraphs(text: &str) -> usize {
    count_segments(&split_paragraphs(text))
}

fn split_segments<'t>(text: &'t str, delimiter: &Regex) -> Vec<&'t str> {
    let mut segments: Vec<&str> = delimiter.split(text).collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}

fn count_segments(segments: &[&str]) -> usize {
    if segments.iter().any(|s| !s.trim().is_empty()) {
        segments.len()
    } else {
        0
    }
}
