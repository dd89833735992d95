//! Plain-text report rendering.
//!
//! The report is the contract shared by screen output and saved files, so
//! its layout is fixed:
//!
//! ```text
//! === TEXT ANALYSIS RESULTS ===
//!
//! Words: 6
//! Characters (with spaces): 11
//! Characters (without spaces): 6
//! Sentences: 1
//! Paragraphs: 1
//!
//! === TOP 10 MOST FREQUENT WORDS ===
//! 1. a: 3 times
//! 2. b: 2 times
//! 3. c: 1 times
//! ```

use std::fmt;

use crate::stats::TextStats;

/// Number of ranked words shown when no other limit is configured.
pub const DEFAULT_TOP_WORDS: usize = 10;

/// A [`TextStats`] paired with the ranking length, rendered via [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    stats: &'a TextStats,
    top: usize,
}

impl<'a> Report<'a> {
    /// Create a report listing up to `top` words.
    pub const fn new(stats: &'a TextStats, top: usize) -> Self {
        Self { stats, top }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        writeln!(f, "=== TEXT ANALYSIS RESULTS ===")?;
        writeln!(f)?;
        writeln!(f, "Words: {}", s.word_count)?;
        writeln!(f, "Characters (with spaces): {}", s.character_count)?;
        writeln!(f, "Characters (without spaces): {}", s.character_count_no_spaces)?;
        writeln!(f, "Sentences: {}", s.sentence_count)?;
        writeln!(f, "Paragraphs: {}", s.paragraph_count)?;
        writeln!(f)?;
        writeln!(f, "=== TOP {} MOST FREQUENT WORDS ===", self.top)?;
        for entry in s.top_words(self.top) {
            writeln!(f, "{}. {}: {} times", entry.rank, entry.word, entry.count)?;
        }
        Ok(())
    }
}

/// Render the report for `stats` with up to `top` ranked words.
pub fn format_report(stats: &TextStats, top: usize) -> String {
    Report::new(stats, top).to_string()
}
