//! Word frequency counting and ranking.
//!
//! The frequency tokenizer is stricter than [`crate::text::split_words`]:
//! it lowercases the text and also splits on common punctuation, so
//! `"Hello,"` and `"hello"` count as the same word.

use std::cmp::Reverse;
use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Characters that separate words for frequency counting.
pub const FREQUENCY_DELIMITERS: &[char] = &[
    ' ', '\t', '\n', '\r', '\x0C', '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']',
    '{', '}',
];

/// One entry of a frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedWord {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// The lowercased word.
    pub word: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Lowercase `text` and split it on [`FREQUENCY_DELIMITERS`].
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(FREQUENCY_DELIMITERS)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Count occurrences of every token produced by [`tokenize`].
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn count_frequencies(text: &str) -> HashMap<String, usize> {
    let lowered = text.to_lowercase();
    let mut freq: HashMap<String, usize> = HashMap::new();
    for word in lowered.split(FREQUENCY_DELIMITERS).filter(|w| !w.is_empty()) {
        *freq.entry(word.to_string()).or_insert(0) += 1;
    }
    freq
}

/// Rank words by descending count, breaking ties alphabetically.
///
/// Returns at most `limit` entries.
pub fn rank_words(freq: &HashMap<String, usize>, limit: usize) -> Vec<RankedWord> {
    let mut entries: Vec<(&str, usize)> = freq.iter().map(|(w, &c)| (w.as_str(), c)).collect();
    entries.sort_unstable_by_key(|&(word, count)| (Reverse(count), word));

    entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (word, count))| RankedWord {
            rank: i + 1,
            word: word.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_strips_punctuation() {
        let tokens = tokenize("Hello, World! (hello) [WORLD]");
        assert_eq!(tokens, vec!["hello", "world", "hello", "world"]);
    }

    #[test]
    fn apostrophes_split_contractions() {
        assert_eq!(tokenize("Don't"), vec!["don", "t"]);
    }

    #[test]
    fn hyphens_stay_inside_tokens() {
        assert_eq!(tokenize("well-known fact"), vec!["well-known", "fact"]);
    }

    #[test]
    fn vertical_tab_is_not_a_frequency_delimiter() {
        assert_eq!(tokenize("a\x0Bb"), vec!["a\x0Bb"]);
    }

    #[test]
    fn counts_sum_to_token_count() {
        let text = "The cat; the hat: THE bat? \"cat\" {hat}";
        let freq = count_frequencies(text);
        let total: usize = freq.values().sum();
        assert_eq!(total, tokenize(text).len());
        assert_eq!(freq["the"], 3);
        assert_eq!(freq["cat"], 2);
        assert_eq!(freq["hat"], 2);
        assert_eq!(freq["bat"], 1);
    }

    #[test]
    fn punctuation_only_has_no_words() {
        assert!(count_frequencies("...!?;:").is_empty());
    }

    #[test]
    fn non_latin_words_are_counted() {
        let freq = count_frequencies("Привет мир, привет!");
        assert_eq!(freq["привет"], 2);
        assert_eq!(freq["мир"], 1);
    }

    #[test]
    fn ranking_orders_by_count() {
        let freq = count_frequencies("a a a b b c");
        let ranked = rank_words(&freq, 10);
        assert_eq!(
            ranked,
            vec![
                RankedWord { rank: 1, word: "a".into(), count: 3 },
                RankedWord { rank: 2, word: "b".into(), count: 2 },
                RankedWord { rank: 3, word: "c".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn ranking_breaks_ties_alphabetically() {
        let freq = count_frequencies("pear apple fig apple pear fig");
        let words: Vec<String> = rank_words(&freq, 10).into_iter().map(|r| r.word).collect();
        assert_eq!(words, vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn ranking_respects_limit() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let ranked = rank_words(&count_frequencies(text), 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked.last().map(|r| r.rank), Some(10));
    }

    #[test]
    fn zero_limit_yields_nothing() {
        assert!(rank_words(&count_frequencies("a b"), 0).is_empty());
    }
}
