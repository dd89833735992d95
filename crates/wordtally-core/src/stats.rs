//! Text statistics: the analyzer and its result type.
//!
//! [`analyze`] is a pure function from text to [`TextStats`]. It runs in
//! time linear in the input length and holds no state, so it can be
//! called from any thread.
//!
//! Word count and word frequency use different tokenizers on purpose:
//! the word count splits on whitespace only, while the frequency map also
//! splits on punctuation. Their totals can differ.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::frequency::{self, RankedWord};
use crate::text;

/// Statistics computed for one block of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextStats {
    /// Number of whitespace-delimited tokens.
    pub word_count: usize,
    /// Number of characters, whitespace included.
    pub character_count: usize,
    /// Number of characters excluding whitespace.
    pub character_count_no_spaces: usize,
    /// Number of segments between runs of `.`, `!`, `?`.
    pub sentence_count: usize,
    /// Number of segments between blank-line runs.
    pub paragraph_count: usize,
    /// Lowercased word → occurrence count.
    pub word_frequency: HashMap<String, usize>,
}

impl TextStats {
    /// Number of distinct words in the frequency map.
    pub fn distinct_words(&self) -> usize {
        self.word_frequency.len()
    }

    /// Sum of all frequency counts.
    pub fn frequency_total(&self) -> usize {
        self.word_frequency.values().sum()
    }

    /// The `limit` most frequent words, ties broken alphabetically.
    pub fn top_words(&self, limit: usize) -> Vec<RankedWord> {
        frequency::rank_words(&self.word_frequency, limit)
    }
}

/// Analyze `text`.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] when the text holds nothing but
/// the whitespace class (space, tab, LF, CR, VT, FF). Other Unicode
/// spaces such as U+00A0 count as content.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze(text: &str) -> AnalysisResult<TextStats> {
    if text.trim_matches(text::is_whitespace_class).is_empty() {
        tracing::debug!("rejecting empty input");
        return Err(AnalysisError::EmptyInput);
    }

    let stats = TextStats {
        word_count: text::count_words(text),
        character_count: text::count_characters(text),
        character_count_no_spaces: text::count_non_whitespace(text),
        sentence_count: text::count_sentences(text),
        paragraph_count: text::count_paragraphs(text),
        word_frequency: frequency::count_frequencies(text),
    };

    tracing::debug!(
        words = stats.word_count,
        sentences = stats.sentence_count,
        paragraphs = stats.paragraph_count,
        distinct = stats.distinct_words(),
        "analysis complete"
    );
    Ok(stats)
}

/// Analyze text that may be absent. `None` is treated as empty input.
pub fn analyze_optional(text: Option<&str>) -> AnalysisResult<TextStats> {
    text.map_or(Err(AnalysisError::EmptyInput), analyze)
}
