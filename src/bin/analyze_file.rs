use fake_news_lib::api::{detect_text, import_text_file, upload_csv};
use fake_news_lib::init_logging;
use fake_news_lib::models::{AnalysisReport, CsvReport};
use fake_news_lib::services::file_import::{detect_kind, FileKind};
use fake_news_lib::services::AppConfig;
use serde::Serialize;

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn print_report(report: &AnalysisReport) {
    let d = &report.detection;
    println!("Prediction: {}", d.label);
    println!("Real: {:.2}%", d.real_probability * 100.0);
    println!("Fake: {:.2}%", d.fake_probability * 100.0);
    println!(
        "Text: {} chars, {} words, {} sentences",
        report.stats.characters, report.stats.words, report.stats.sentences
    );
    println!();
    println!("Top words:");
    if report.top_words.is_empty() {
        println!("  No significant words found.");
    }
    for w in &report.top_words {
        println!("  {} - {} times", w.word, w.count);
    }
    println!();
    println!("Summary:");
    println!("  {}", report.summary);
}

fn print_csv_report(report: &CsvReport, rows_n: usize) {
    println!("Column: {}", report.column);
    println!("Rows: {}", report.rows.len());
    for r in report.rows.iter().take(rows_n) {
        let d = &r.report.detection;
        let top = r
            .report
            .top_words
            .first()
            .map(|w| w.word.as_str())
            .unwrap_or("-");
        println!(
            "[R{:04}] {:<7} fake={:>6.2}%  top={}  {}",
            r.row,
            d.label.as_str(),
            d.fake_probability * 100.0,
            top,
            preview(&r.report.summary, 80)
        );
    }
    if report.rows.len() > rows_n {
        println!("... ({} more rows)", report.rows.len() - rows_n);
    }
    let s = &report.summary;
    println!();
    println!(
        "Summary: fake={} real={} unknown={} avg_fake={:.2}% max_fake={:.2}%",
        s.fake_count,
        s.real_count,
        s.unknown_count,
        s.avg_fake_probability * 100.0,
        s.max_fake_probability * 100.0
    );
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin analyze_file -- <path.txt|.docx|.pdf|.csv> [--column <name>] [--seed <n>] [--top <n>] [--rows <n>] [--out <json_path>]\n\nNotes:\n  - CSV files are analyzed row by row; `--column` picks the text column (default: text, else the first column).\n  - `--seed` makes the scores reproducible."
        );
        return Ok(());
    }

    init_logging();

    let path = std::path::PathBuf::from(&args[1]);
    let mut config = AppConfig::default();
    config.apply_env_overrides();
    if let Some(seed) = parse_arg_value(&args, "--seed").and_then(|s| s.parse().ok()) {
        config.detection.seed = Some(seed);
    }
    if let Some(top) = parse_arg_value(&args, "--top").and_then(|s| s.parse().ok()) {
        config.detection.top_words_limit = top;
    }
    let rows_n: usize = parse_arg_value(&args, "--rows")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    let column = parse_arg_value(&args, "--column");
    let out_path = parse_arg_value(&args, "--out");

    println!("File: {}", path.display());
    println!(
        "Seed: {}",
        config.detection.seed.map(|s| s.to_string()).unwrap_or_else(|| "(random)".to_string())
    );
    println!();

    #[derive(Serialize)]
    #[serde(untagged)]
    enum Output {
        Document(AnalysisReport),
        Csv(CsvReport),
    }

    let file_name = path.to_string_lossy().to_string();
    let output = match detect_kind(&file_name)? {
        FileKind::Csv => {
            let report = upload_csv(&path, column.as_deref(), &config)?;
            print_csv_report(&report, rows_n);
            Output::Csv(report)
        }
        _ => {
            let imported = import_text_file(&path)?;
            println!("Extracted: {} chars ({} bytes)", imported.text.chars().count(), imported.text.len());
            println!();
            let report = detect_text(&imported.text, &config)?;
            print_report(&report);
            Output::Document(report)
        }
    };

    if let Some(out_path) = out_path {
        let json = serde_json::to_string_pretty(&output)?;
        std::fs::write(&out_path, json)?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
