// Word Frequency Extractor
// Ranks the most frequent significant words of a text

use std::collections::HashMap;

use crate::models::WordCount;
use crate::services::text_processor::tokenize;

pub const DEFAULT_TOP_WORDS: usize = 5;
/// Tokens need at least this many characters to count as significant
const MIN_WORD_CHARS: usize = 4;

/// Top `limit` words by descending count.
/// Equal counts keep the order in which the words first appear in the text.
pub fn top_words(text: &str, limit: usize) -> Vec<WordCount> {
    if limit == 0 {
        return Vec::new();
    }

    // word -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in tokenize(text)
        .into_iter()
        .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
        .enumerate()
    {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, count, _)| WordCount { word, count })
        .collect()
}
