// File Import Service
// Extracts raw text from .txt/.docx/.pdf files and text columns from .csv files

use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{AppError, AppResult};
use crate::services::text_processor::normalize_punctuation;

/// Column looked up when no CSV column is requested
pub const DEFAULT_CSV_COLUMN: &str = "text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Docx,
    Pdf,
    Csv,
}

/// Classify a file by extension
pub fn detect_kind(file_name: &str) -> AppResult<FileKind> {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "text" | "md" => Ok(FileKind::Text),
        "docx" => Ok(FileKind::Docx),
        "pdf" => Ok(FileKind::Pdf),
        "csv" => Ok(FileKind::Csv),
        _ => Err(AppError::UnsupportedFile(file_name.to_string())),
    }
}

/// Extract normalized plain text from a document's bytes
pub fn preprocess_file(file_name: &str, bytes: &[u8]) -> AppResult<String> {
    let raw = match detect_kind(file_name)? {
        FileKind::Text => decode_text_lossy(bytes),
        FileKind::Docx => extract_docx_text(bytes)?,
        FileKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Pdf(e.to_string()))?,
        FileKind::Csv => {
            return Err(AppError::InvalidInput(format!(
                "{} is a CSV file; analyze it row by row instead",
                file_name
            )))
        }
    };
    Ok(normalize_punctuation(&raw))
}

/// UTF-8 decode that drops undecodable bytes
fn decode_text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

fn xml_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("xml tag regex"))
}

fn docx_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("docx break regex"))
}

fn docx_tab_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<w:tab\s*/>").expect("docx tab regex"))
}

/// Read word/document.xml out of the DOCX container and strip the markup
pub fn extract_docx_text(bytes: &[u8]) -> AppResult<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;

    let xml = docx_break_re().replace_all(&xml, "\n");
    let xml = docx_tab_re().replace_all(&xml, "\t");
    let text = xml_tag_re().replace_all(&xml, "");
    Ok(unescape_xml(&text))
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Texts of one CSV column, in row order.
///
/// `column` is matched case-insensitively against the header row. Without a
/// requested column the `text` column is used, falling back to the first one.
pub fn read_csv_column(bytes: &[u8], column: Option<&str>) -> AppResult<(String, Vec<String>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    // Byte records so one badly encoded row cannot sink the batch
    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(decode_text_lossy)
        .collect();
    if headers.is_empty() {
        return Err(AppError::InvalidInput("CSV file has no columns".to_string()));
    }

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
    };

    let index = match column {
        Some(name) => find(name)
            .ok_or_else(|| AppError::InvalidInput(format!("CSV column '{}' not found", name)))?,
        None => find(DEFAULT_CSV_COLUMN).unwrap_or(0),
    };
    let column_name = headers[index].trim().to_string();

    let mut texts = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        texts.push(record.get(index).map(decode_text_lossy).unwrap_or_default());
    }

    Ok((column_name, texts))
}
