// Keyword Scorer
// Placeholder fake-news model: keyword hits plus a random draw.
//
// fake = min(0.95, 0.3 + (hits + noise) * 0.1), real = 1 - fake,
// label = Fake when fake >= 0.5. The random source is injected so seeded
// models are reproducible.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::models::DetectionResult;
use crate::services::config_store::DetectionConfig;
use crate::services::text_processor::is_blank;

pub const DEFAULT_KEYWORDS: [&str; 5] = ["conspiracy", "hoax", "clickbait", "shocking", "exposed"];

const BASE_FAKE_PROBABILITY: f64 = 0.3;
const KEYWORD_WEIGHT: f64 = 0.1;
const MAX_FAKE_PROBABILITY: f64 = 0.95;

/// Anything that can turn text into a detection verdict
pub trait DetectionModel {
    fn name(&self) -> &str;
    fn predict(&mut self, text: &str) -> DetectionResult;
}

/// Case-insensitive, non-overlapping substring hits summed over all keywords
pub fn count_keyword_hits<S: AsRef<str>>(text: &str, keywords: &[S]) -> usize {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .map(|k| lowered.matches(k.as_str()).count())
        .sum()
}

/// Score with a fixed noise value in [0, 1); out-of-range noise is clamped.
pub fn score_with_noise<S: AsRef<str>>(text: &str, keywords: &[S], noise: f64) -> DetectionResult {
    if is_blank(text) {
        return DetectionResult::unknown();
    }

    let noise = if noise.is_finite() { noise.clamp(0.0, 1.0) } else { 0.0 };
    let raw_score = count_keyword_hits(text, keywords) as f64 + noise;
    let fake_probability = (BASE_FAKE_PROBABILITY + raw_score * KEYWORD_WEIGHT).min(MAX_FAKE_PROBABILITY);
    DetectionResult::from_fake_probability(fake_probability)
}

/// Score with the default keywords and the thread RNG (not reproducible)
pub fn score(text: &str) -> DetectionResult {
    KeywordModel::<ThreadRng>::default().predict(text)
}

pub struct KeywordModel<R = ThreadRng> {
    keywords: Vec<String>,
    rng: R,
}

fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

impl KeywordModel<ThreadRng> {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self::with_rng(keywords, rand::rng())
    }
}

impl Default for KeywordModel<ThreadRng> {
    fn default() -> Self {
        Self::new(&DEFAULT_KEYWORDS)
    }
}

impl KeywordModel<StdRng> {
    pub fn seeded<S: AsRef<str>>(keywords: &[S], seed: u64) -> Self {
        Self::with_rng(keywords, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> KeywordModel<R> {
    pub fn with_rng<S: AsRef<str>>(keywords: &[S], rng: R) -> Self {
        Self {
            keywords: normalize_keywords(keywords),
            rng,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl<R: Rng> DetectionModel for KeywordModel<R> {
    fn name(&self) -> &str {
        "keyword-heuristic"
    }

    fn predict(&mut self, text: &str) -> DetectionResult {
        if is_blank(text) {
            return DetectionResult::unknown();
        }
        let noise: f64 = self.rng.random();
        score_with_noise(text, &self.keywords, noise)
    }
}

/// Model described by the detection config: seeded when a seed is set
pub fn build_model(config: &DetectionConfig) -> Box<dyn DetectionModel> {
    match config.seed {
        Some(seed) => Box::new(KeywordModel::seeded(&config.keywords, seed)),
        None => Box::new(KeywordModel::new(&config.keywords)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_text_is_unknown() {
        for text in ["", "   ", "\n\t  ", "\u{1c}\u{1f} "] {
            let r = score(text);
            assert_eq!(r.label, Label::Unknown);
            assert_eq!(r.real_probability, 0.0);
            assert_eq!(r.fake_probability, 0.0);
        }
    }

    #[test]
    fn test_keyword_hits_case_insensitive() {
        let text = "This SHOCKING conspiracy video exposed everything. Hoax.";
        assert_eq!(count_keyword_hits(text, &DEFAULT_KEYWORDS), 4);
        assert_eq!(count_keyword_hits("hoaxhoax", &["hoax"]), 2);
        assert_eq!(count_keyword_hits("nothing to see", &DEFAULT_KEYWORDS), 0);
    }

    #[test]
    fn test_score_with_noise_arithmetic() {
        let r = score_with_noise("a hoax", &DEFAULT_KEYWORDS, 0.0);
        assert!((r.fake_probability - 0.4).abs() < EPS);
        assert!((r.real_probability - 0.6).abs() < EPS);
        assert_eq!(r.label, Label::Real);

        let r = score_with_noise("plain text", &DEFAULT_KEYWORDS, 0.5);
        assert!((r.fake_probability - 0.35).abs() < EPS);
        assert_eq!(r.label, Label::Real);
    }

    #[test]
    fn test_score_capped() {
        let text = "hoax ".repeat(20);
        let r = score_with_noise(&text, &DEFAULT_KEYWORDS, 0.99);
        assert!((r.fake_probability - 0.95).abs() < EPS);
        assert_eq!(r.label, Label::Fake);
    }

    #[test]
    fn test_four_keywords_always_fake() {
        let text = "This shocking conspiracy video exposed everything. Hoax.";
        for noise in [0.0, 0.25, 0.5, 0.999] {
            let r = score_with_noise(text, &DEFAULT_KEYWORDS, noise);
            assert_eq!(r.label, Label::Fake);
            assert!(r.fake_probability >= 0.7 - EPS);
        }
        for _ in 0..20 {
            assert_eq!(score(text).label, Label::Fake);
        }
    }

    #[test]
    fn test_single_keyword_never_fake() {
        for _ in 0..20 {
            let r = score("just a clickbait headline");
            assert_eq!(r.label, Label::Real);
            assert!(r.fake_probability >= 0.4 - EPS && r.fake_probability < 0.5);
        }
    }

    #[test]
    fn test_seeded_models_reproducible() {
        let text = "An ordinary article about the weather.";
        let mut a = KeywordModel::seeded(&DEFAULT_KEYWORDS, 42);
        let mut b = KeywordModel::seeded(&DEFAULT_KEYWORDS, 42);
        for _ in 0..5 {
            assert_eq!(a.predict(text), b.predict(text));
        }
    }

    #[test]
    fn test_custom_keywords_normalized() {
        let model = KeywordModel::new(&["  Fake ", "", "RUMOR"]);
        assert_eq!(model.keywords(), &["fake".to_string(), "rumor".to_string()]);
    }

    #[test]
    fn test_build_model_uses_seed() {
        let config = DetectionConfig {
            seed: Some(7),
            ..DetectionConfig::default()
        };
        let mut a = build_model(&config);
        let mut b = build_model(&config);
        assert_eq!(a.name(), "keyword-heuristic");
        assert_eq!(a.predict("some text"), b.predict("some text"));
    }
}
