// Fake News Detector Core Services

pub mod text_processor;
pub mod word_frequency;
pub mod summarizer;
pub mod config_store;
pub mod file_import;
pub mod detection;
pub mod dashboard;

pub use text_processor::*;
pub use word_frequency::*;
pub use summarizer::*;
pub use config_store::*;
pub use file_import::*;

// Re-export detection module functions
pub use detection::{
    aggregate_detections,
    aggregate_reports,
    build_model,
    count_keyword_hits,
    score,
    score_with_noise,
    DetectionModel,
    KeywordModel,
    DEFAULT_KEYWORDS,
};
