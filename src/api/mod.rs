// Command Layer
// Entry points the dashboard and CLI call: detection, file import, CSV batches, config

use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AnalysisReport, CsvReport, CsvRowReport, ImportedText};
use crate::services::{
    aggregate_reports, build_model, preprocess_file, read_csv_column, summarize, text_stats,
    top_words, AppConfig, ConfigStore, DetectionModel,
};

/// Reject text that is not well-formed (embedded NUL means binary content)
pub fn validate_text(text: &str) -> AppResult<()> {
    if text.contains('\0') {
        return Err(AppError::InvalidInput(
            "text contains NUL bytes; expected plain text".to_string(),
        ));
    }
    Ok(())
}

/// Run the model, word-frequency extractor and summarizer over one text
pub fn analyze_with_model(
    text: &str,
    model: &mut dyn DetectionModel,
    top_words_limit: usize,
) -> AnalysisReport {
    let started = Instant::now();
    let detection = model.predict(text);
    let words = top_words(text, top_words_limit);
    let summary = summarize(text);

    AnalysisReport {
        request_id: Uuid::new_v4().to_string(),
        model: model.name().to_string(),
        detection,
        top_words: words,
        summary,
        stats: text_stats(text),
        analyzed_at: chrono::Utc::now().to_rfc3339(),
        latency_ms: started.elapsed().as_millis() as i64,
    }
}

/// Analyze text with a model built from the config
pub fn detect_text(text: &str, config: &AppConfig) -> AppResult<AnalysisReport> {
    let mut model = build_model(&config.detection);
    detect_text_with_model(text, model.as_mut(), config)
}

/// Analyze text with a caller-owned model (keeps a seeded sequence going across calls)
pub fn detect_text_with_model(
    text: &str,
    model: &mut dyn DetectionModel,
    config: &AppConfig,
) -> AppResult<AnalysisReport> {
    validate_text(text)?;
    let report = analyze_with_model(text, model, config.detection.top_words_limit);
    info!(
        request_id = %report.request_id,
        chars = report.stats.characters,
        label = %report.detection.label,
        fake_probability = report.detection.fake_probability,
        latency_ms = report.latency_ms,
        "detect.completed"
    );
    Ok(report)
}

/// Analyze raw bytes; input must be valid UTF-8
pub fn detect_bytes(bytes: &[u8], config: &AppConfig) -> AppResult<AnalysisReport> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| AppError::InvalidInput(format!("text is not valid UTF-8: {}", e)))?;
    detect_text(text, config)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a .txt/.docx/.pdf file as normalized text
pub fn import_text_file(path: &Path) -> AppResult<ImportedText> {
    let file_name = display_name(path);
    let bytes = std::fs::read(path)?;
    let text = preprocess_file(&file_name, &bytes)?;
    info!(file = %file_name, bytes = bytes.len(), chars = text.chars().count(), "import.loaded");
    Ok(ImportedText { file_name, text })
}

/// Analyze every row of one CSV text column and aggregate the results
pub fn upload_csv(path: &Path, column: Option<&str>, config: &AppConfig) -> AppResult<CsvReport> {
    let file_name = display_name(path);
    let bytes = std::fs::read(path)?;
    let (column, texts) = read_csv_column(&bytes, column)?;

    let mut model = build_model(&config.detection);
    let mut rows = Vec::with_capacity(texts.len());
    for (row, text) in texts.iter().enumerate() {
        match validate_text(text) {
            Ok(()) => rows.push(CsvRowReport {
                row,
                report: analyze_with_model(text, model.as_mut(), config.detection.top_words_limit),
            }),
            Err(e) => warn!(file = %file_name, row, error = %e, "csv.row_skipped"),
        }
    }

    let reports: Vec<AnalysisReport> = rows.iter().map(|r| r.report.clone()).collect();
    let summary = aggregate_reports(&reports);
    info!(
        file = %file_name,
        column = %column,
        rows = summary.count,
        fake = summary.fake_count,
        real = summary.real_count,
        unknown = summary.unknown_count,
        "csv.completed"
    );

    Ok(CsvReport {
        file_name,
        column,
        rows,
        summary,
    })
}

pub fn get_config(store: &ConfigStore) -> AppResult<AppConfig> {
    store.load()
}

pub fn save_config(store: &ConfigStore, config: &AppConfig) -> AppResult<()> {
    store.save(config)?;
    info!(path = %store.config_file().display(), "config.saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;
    use crate::services::{KeywordModel, DEFAULT_KEYWORDS, NOT_ENOUGH_CONTENT};

    fn seeded_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.detection.seed = Some(11);
        config
    }

    #[test]
    fn test_detect_text_full_report() {
        let text = "This shocking conspiracy video exposed everything. Hoax. \
                    The video shows nothing shocking at all for anyone watching.";
        let report = detect_text(text, &seeded_config()).unwrap();
        assert_eq!(report.detection.label, Label::Fake);
        assert_eq!(report.model, "keyword-heuristic");
        assert_eq!(report.top_words[0].word, "shocking");
        assert_eq!(report.top_words[0].count, 2);
        assert!(report.top_words.len() <= 5);
        assert!(report.summary.starts_with("This shocking conspiracy video exposed everything."));
        assert!(Uuid::parse_str(&report.request_id).is_ok());
    }

    #[test]
    fn test_detect_empty_text() {
        let report = detect_text("   ", &AppConfig::default()).unwrap();
        assert_eq!(report.detection.label, Label::Unknown);
        assert!(report.top_words.is_empty());
        assert_eq!(report.summary, NOT_ENOUGH_CONTENT);
    }

    #[test]
    fn test_detect_rejects_malformed_input() {
        let config = AppConfig::default();
        assert!(matches!(detect_text("abc\0def", &config), Err(AppError::InvalidInput(_))));
        assert!(matches!(detect_bytes(&[0x66, 0xff, 0x6f], &config), Err(AppError::InvalidInput(_))));
        assert!(detect_bytes(b"valid text", &config).is_ok());
    }

    #[test]
    fn test_caller_owned_model_is_reproducible() {
        let config = AppConfig::default();
        let mut a = KeywordModel::seeded(&DEFAULT_KEYWORDS, 5);
        let mut b = KeywordModel::seeded(&DEFAULT_KEYWORDS, 5);
        let first = detect_text_with_model("one hoax", &mut a, &config).unwrap();
        let second = detect_text_with_model("one hoax", &mut b, &config).unwrap();
        assert_eq!(first.detection, second.detection);
    }

    #[test]
    fn test_top_words_limit_from_config() {
        let mut config = seeded_config();
        config.detection.top_words_limit = 2;
        let report = detect_text("alpha beta gamma delta epsilon", &config).unwrap();
        assert_eq!(report.top_words.len(), 2);
    }

    #[test]
    fn test_import_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("article.txt");
        std::fs::write(&path, "Line one\r\nLine two").unwrap();
        let imported = import_text_file(&path).unwrap();
        assert_eq!(imported.file_name, "article.txt");
        assert_eq!(imported.text, "Line one\nLine two");
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_text_file(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_upload_csv_analyzes_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(
            &path,
            "id,text\n1,Shocking hoax exposed by clickbait conspiracy\n2,\n3,A calm report on local weather\n",
        )
        .unwrap();

        let report = upload_csv(&path, None, &seeded_config()).unwrap();
        assert_eq!(report.file_name, "rows.csv");
        assert_eq!(report.column, "text");
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].row, 0);
        assert_eq!(report.rows[0].report.detection.label, Label::Fake);
        assert_eq!(report.rows[1].report.detection.label, Label::Unknown);
        assert_eq!(report.rows[2].report.detection.label, Label::Real);
        assert_eq!(report.summary.count, 3);
        assert_eq!(report.summary.fake_count, 1);
        assert_eq!(report.summary.real_count, 1);
        assert_eq!(report.summary.unknown_count, 1);
    }

    #[test]
    fn test_upload_csv_survives_badly_encoded_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.csv");
        std::fs::write(
            &path,
            b"text\nA calm and quiet report about gardens\nbad \xff row here\nAnother fine row\n",
        )
        .unwrap();

        let report = upload_csv(&path, None, &seeded_config()).unwrap();
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.summary.count, 3);
        assert_eq!(report.rows[2].row, 2);
    }

    #[test]
    fn test_save_and_get_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().to_path_buf());
        let config = seeded_config();
        save_config(&store, &config).unwrap();
        assert_eq!(get_config(&store).unwrap().detection.seed, Some(11));
    }
}
