// Summarizer
// Naive extractive summary: the first few long-enough period-delimited sentences

pub const NOT_ENOUGH_CONTENT: &str = "Not enough content to summarize.";

/// Sentences need more than this many characters once trimmed
const MIN_SENTENCE_CHARS: usize = 20;
const MAX_SUMMARY_SENTENCES: usize = 3;

/// Trimmed period-delimited pieces longer than the sentence threshold, in text order
pub fn qualifying_sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

pub fn summarize(text: &str) -> String {
    let sentences = qualifying_sentences(text);
    if sentences.is_empty() {
        return NOT_ENOUGH_CONTENT.to_string();
    }

    let picked: Vec<&str> = sentences.into_iter().take(MAX_SUMMARY_SENTENCES).collect();
    format!("{}.", picked.join(". "))
}
