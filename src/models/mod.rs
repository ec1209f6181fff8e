// Fake News Detector Data Models
// Detection results, reports and dashboard values shared by every layer

use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Detection ============

/// Categorical verdict of the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Real,
    Fake,
    Unknown,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "Real",
            Label::Fake => "Fake",
            Label::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub label: Label,
    pub real_probability: f64,
    pub fake_probability: f64,
}

/// Fake probability at or above which a text is labeled Fake
pub const FAKE_LABEL_THRESHOLD: f64 = 0.5;

impl DetectionResult {
    /// Result for empty or whitespace-only input
    pub fn unknown() -> Self {
        Self {
            label: Label::Unknown,
            real_probability: 0.0,
            fake_probability: 0.0,
        }
    }

    /// Build a Real/Fake result from the fake probability; real is its complement.
    pub fn from_fake_probability(fake_probability: f64) -> Self {
        let fake_probability = fake_probability.clamp(0.0, 1.0);
        let label = if fake_probability >= FAKE_LABEL_THRESHOLD {
            Label::Fake
        } else {
            Label::Real
        };
        Self {
            label,
            real_probability: 1.0 - fake_probability,
            fake_probability,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.label == Label::Unknown
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

// ============ Reports ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub sentences: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub request_id: String,
    pub model: String,
    pub detection: DetectionResult,
    pub top_words: Vec<WordCount>,
    pub summary: String,
    pub stats: TextStats,
    pub analyzed_at: String,
    pub latency_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedText {
    pub file_name: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvRowReport {
    /// 0-based data row index (header excluded)
    pub row: usize,
    pub report: AnalysisReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub count: usize,
    pub fake_count: usize,
    pub real_count: usize,
    pub unknown_count: usize,
    pub avg_fake_probability: f64,
    pub max_fake_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvReport {
    pub file_name: String,
    pub column: String,
    pub rows: Vec<CsvRowReport>,
    pub summary: BatchSummary,
}

// ============ Dashboard ============

/// Color theme of the dashboard; each variant maps to a fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub text: &'static str,
    pub chart_bg: &'static str,
    pub pie_real: &'static str,
    pub pie_fake: &'static str,
}

const DARK_PALETTE: Palette = Palette {
    bg: "#121212",
    text: "#FFFFFF",
    chart_bg: "#1E1E1E",
    pie_real: "#74B9FF",
    pie_fake: "#FF7675",
};

const LIGHT_PALETTE: Palette = Palette {
    bg: "#FFFFFF",
    text: "#000000",
    chart_bg: "#FFFFFF",
    pie_real: "#0984E3",
    pie_fake: "#D63031",
};

impl Theme {
    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK_PALETTE,
            Theme::Light => &LIGHT_PALETTE,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn from_name(val: &str) -> Option<Self> {
        match val.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Details,
}

impl Tab {
    pub fn from_name(val: &str) -> Option<Self> {
        match val.trim().to_lowercase().as_str() {
            "dashboard" | "0" => Some(Tab::Dashboard),
            "details" | "1" => Some(Tab::Details),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Details => "Details",
        }
    }
}

/// Parse a `#RRGGBB` palette entry into its components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fake_probability_threshold() {
        let fake = DetectionResult::from_fake_probability(0.5);
        assert_eq!(fake.label, Label::Fake);
        let real = DetectionResult::from_fake_probability(0.49);
        assert_eq!(real.label, Label::Real);
        assert!((real.real_probability + real.fake_probability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_has_zero_probabilities() {
        let r = DetectionResult::unknown();
        assert!(r.is_unknown());
        assert_eq!(r.real_probability, 0.0);
        assert_eq!(r.fake_probability, 0.0);
    }

    #[test]
    fn test_detection_serializes_camel_case() {
        let json = serde_json::to_string(&DetectionResult::from_fake_probability(0.7)).unwrap();
        assert!(json.contains("\"label\":\"Fake\""));
        assert!(json.contains("realProbability"));
        assert!(json.contains("fakeProbability"));
    }

    #[test]
    fn test_theme_toggle_and_palette() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Light.palette().pie_fake, "#D63031");
        assert_eq!(Theme::from_name(" LIGHT "), Some(Theme::Light));
        assert_eq!(Theme::from_name("blue"), None);
    }

    #[test]
    fn test_tab_from_name() {
        assert_eq!(Tab::from_name("Details"), Some(Tab::Details));
        assert_eq!(Tab::from_name(" 0 "), Some(Tab::Dashboard));
        assert_eq!(Tab::from_name("settings"), None);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#74B9FF"), Some((0x74, 0xB9, 0xFF)));
        assert_eq!(hex_to_rgb("74B9FF"), None);
        assert_eq!(hex_to_rgb("#12"), None);
    }
}
