// Detection Module
// Placeholder fake-news detection organized into:
// - scorer: keyword + random-draw model behind the DetectionModel trait
// - aggregation: batch statistics over many detection results

pub mod scorer;
pub mod aggregation;

// Re-export commonly used functions
pub use scorer::{
    build_model,
    count_keyword_hits,
    score,
    score_with_noise,
    DetectionModel,
    KeywordModel,
    DEFAULT_KEYWORDS,
};
pub use aggregation::{aggregate_detections, aggregate_reports};
