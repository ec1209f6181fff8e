//! Property-based tests for the scorer, word-frequency extractor and summarizer
//!
//! These check the invariants that must hold for any input text, whatever
//! the random draw of the scorer turns out to be.

use fake_news_lib::models::Label;
use fake_news_lib::services::{
    count_keyword_hits, qualifying_sentences, score, score_with_noise, summarize, top_words,
    DEFAULT_KEYWORDS, NOT_ENOUGH_CONTENT,
};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

// Separator-only strings, including the empty string
fn blank_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \t\n\r\x1c-\x1f]{0,16}").unwrap()
}

// Short news-like texts mixing plain words, keywords and punctuation
fn text_strategy() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        prop::string::string_regex("[a-zA-Z]{1,9}").unwrap(),
        Just("hoax".to_string()),
        Just("SHOCKING".to_string()),
        Just("exposed!".to_string()),
        Just("conspiracy.".to_string()),
        Just("(clickbait)".to_string()),
    ];
    prop::collection::vec(word, 1..40).prop_map(|words| words.join(" "))
}

proptest! {
    /// Property: blank input is always Unknown with zero probabilities
    #[test]
    fn prop_blank_text_unknown(text in blank_strategy()) {
        let r = score(&text);
        prop_assert_eq!(r.label, Label::Unknown);
        prop_assert_eq!(r.real_probability, 0.0);
        prop_assert_eq!(r.fake_probability, 0.0);
    }

    /// Property: non-blank input yields complementary probabilities within [0.3, 0.95]
    #[test]
    fn prop_probabilities_complementary(text in text_strategy()) {
        let r = score(&text);
        prop_assert!(r.label != Label::Unknown);
        prop_assert!((r.real_probability + r.fake_probability - 1.0).abs() < EPS);
        prop_assert!(r.fake_probability >= 0.3 - EPS);
        prop_assert!(r.fake_probability <= 0.95 + EPS);
    }

    /// Property: the label follows the 0.5 threshold, and two or more keyword hits
    /// make it Fake regardless of the random draw
    #[test]
    fn prop_label_matches_threshold(text in text_strategy(), noise in 0.0f64..1.0) {
        let r = score_with_noise(&text, &DEFAULT_KEYWORDS, noise);
        let expected = if r.fake_probability >= 0.5 { Label::Fake } else { Label::Real };
        prop_assert_eq!(r.label, expected);
        if count_keyword_hits(&text, &DEFAULT_KEYWORDS) >= 2 {
            prop_assert_eq!(r.label, Label::Fake);
        }
    }

    /// Property: top words respect the limit, the length floor and descending counts
    #[test]
    fn prop_top_words_bounded(text in text_strategy(), limit in 0usize..8) {
        let words = top_words(&text, limit);
        prop_assert!(words.len() <= limit);
        for w in &words {
            prop_assert!(w.word.chars().count() > 3);
            prop_assert!(w.count >= 1);
            prop_assert_eq!(w.word.to_lowercase(), w.word.clone());
        }
        for pair in words.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    /// Property: a summary is the fallback message, or the first three
    /// qualifying sentences joined by ". " with a closing period
    #[test]
    fn prop_summary_shape(text in ".{0,200}") {
        let summary = summarize(&text);
        let sentences = qualifying_sentences(&text);
        if sentences.is_empty() {
            prop_assert_eq!(summary, NOT_ENOUGH_CONTENT);
        } else {
            let n = sentences.len().min(3);
            prop_assert_eq!(summary, format!("{}.", sentences[..n].join(". ")));
        }
    }
}

#[test]
fn four_keyword_scenario_is_always_fake() {
    let text = "This shocking conspiracy video exposed everything. Hoax.";
    assert_eq!(count_keyword_hits(text, &DEFAULT_KEYWORDS), 4);
    for _ in 0..50 {
        let r = score(text);
        assert_eq!(r.label, Label::Fake);
        assert!(r.fake_probability >= 0.7 - EPS);
    }
}

#[test]
fn three_letter_boundary() {
    assert!(top_words("aaa bbb", 5).is_empty());
    assert_eq!(top_words("aaaa bbb", 5).len(), 1);
}

#[test]
fn summary_examples() {
    assert_eq!(summarize(""), NOT_ENOUGH_CONTENT);
    assert_eq!(
        summarize("This is a decently long sentence here. Hi. Another decently long one now."),
        "This is a decently long sentence here. Another decently long one now."
    );
}
