// Text Processing Service
// Normalization for imported documents, tokenization and basic text statistics

use regex::Regex;
use std::sync::OnceLock;

use crate::models::TextStats;

/// Characters stripped from both ends of every token
pub const TOKEN_STRIP_CHARS: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '"', '\''];

fn space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}]").expect("space regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B]+").expect("whitespace regex"))
}

/// Normalize punctuation and whitespace in text extracted from files
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text.to_string();

    // Replace smart quotes
    s = s.replace('\u{201c}', "\"")  // "
         .replace('\u{201d}', "\"")  // "
         .replace('\u{2018}', "'")   // '
         .replace('\u{2019}', "'");  // '

    // Replace em dash
    s = s.replace('\u{2014}', "-");

    // Replace ideographic space and non-breaking space
    s = space_re().replace_all(&s, " ").to_string();

    // Normalize line endings
    s = s.replace("\r\n", "\n").replace('\r', "\n");

    // Collapse horizontal whitespace
    s = horizontal_ws_re().replace_all(&s, " ").to_string();

    // Strip each line
    s = s.lines()
         .map(|ln| ln.trim())
         .collect::<Vec<_>>()
         .join("\n");

    s.trim().to_string()
}

/// Unicode whitespace plus the ASCII file/group/record/unit separators
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// True when the text holds nothing but separators
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_word_separator)
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_word_separator).filter(|w| !w.is_empty())
}

/// Split on whitespace, strip surrounding punctuation and lowercase.
/// Tokens that are pure punctuation are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    split_words(text)
        .map(|w| w.trim_matches(TOKEN_STRIP_CHARS).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Character, word and period-delimited sentence counts
pub fn text_stats(text: &str) -> TextStats {
    TextStats {
        characters: text.chars().count(),
        words: split_words(text).count(),
        sentences: text.split('.').filter(|s| !s.trim().is_empty()).count(),
    }
}
