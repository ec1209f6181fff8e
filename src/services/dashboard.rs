// Dashboard State
// Terminal stand-in for the detector window: user intents arrive as Action
// values, state changes happen only in dispatch/finish_* and anything that
// needs I/O or waiting is handed back to the shell as an Effect.

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::models::{hex_to_rgb, AnalysisReport, BatchSummary, CsvReport, ImportedText, Tab, Theme};
use crate::services::text_processor::is_blank;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_EMPTY_INPUT: &str = "Please enter text first.";
pub const STATUS_PROCESSING: &str = "Processing...";
const INPUT_PLACEHOLDER: &str = "Paste news article text here...";
const NO_DETAILS: &str = "Run a detection to see details.";
const NO_SIGNIFICANT_WORDS: &str = "No significant words found.";
const CHART_WIDTH: usize = 40;
const INPUT_PREVIEW_LINES: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Detect,
    Clear,
    SetText(String),
    AppendText(String),
    ImportTextFile(PathBuf),
    UploadCsv { path: PathBuf, column: Option<String> },
    ToggleTheme,
    SwitchTab(Tab),
}

/// Work the shell must perform after a dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    RunDetection(String),
    LoadTextFile(PathBuf),
    LoadCsv { path: PathBuf, column: Option<String> },
    PersistTheme(Theme),
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    text: String,
    theme: Theme,
    tab: Tab,
    status: String,
    processing: bool,
    /// (real, fake) shares shown in the confidence chart
    chart: (f64, f64),
    report: Option<AnalysisReport>,
    batch: Option<BatchSummary>,
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl DashboardState {
    pub fn new(theme: Theme) -> Self {
        Self {
            text: String::new(),
            theme,
            tab: Tab::Dashboard,
            status: STATUS_READY.to_string(),
            processing: false,
            chart: (0.5, 0.5),
            report: None,
            batch: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn chart(&self) -> (f64, f64) {
        self.chart
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn dispatch(&mut self, action: Action) -> Effect {
        match action {
            Action::Detect => {
                if self.processing {
                    return Effect::None;
                }
                if is_blank(&self.text) {
                    self.status = STATUS_EMPTY_INPUT.to_string();
                    return Effect::None;
                }
                self.processing = true;
                self.status = STATUS_PROCESSING.to_string();
                Effect::RunDetection(self.text.clone())
            }
            Action::Clear => {
                self.text.clear();
                Effect::None
            }
            Action::SetText(text) => {
                self.text = text;
                Effect::None
            }
            Action::AppendText(line) => {
                if !self.text.is_empty() {
                    self.text.push('\n');
                }
                self.text.push_str(&line);
                Effect::None
            }
            Action::ImportTextFile(path) => Effect::LoadTextFile(path),
            Action::UploadCsv { path, column } => {
                self.status = format!("CSV selected: {}", file_label(&path));
                Effect::LoadCsv { path, column }
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                // neutral chart until the next detection
                self.chart = (0.5, 0.5);
                Effect::PersistTheme(self.theme)
            }
            Action::SwitchTab(tab) => {
                self.tab = tab;
                Effect::None
            }
        }
    }

    pub fn finish_detection(&mut self, report: AnalysisReport) {
        let d = report.detection;
        self.chart = (d.real_probability, d.fake_probability);
        self.status = format!("Prediction complete: {}", d.label);
        self.processing = false;
        self.report = Some(report);
    }

    pub fn finish_import(&mut self, imported: ImportedText) {
        self.status = format!("Loaded: {}", imported.file_name);
        self.text = imported.text;
    }

    pub fn finish_csv(&mut self, report: &CsvReport) {
        self.status = format!(
            "CSV analyzed: {} ({} rows from '{}')",
            report.file_name, report.summary.count, report.column
        );
        self.batch = Some(report.summary.clone());
    }

    pub fn fail(&mut self, message: &str) {
        self.processing = false;
        self.status = format!("Error: {}", message);
    }

    pub fn view(&self) -> DashboardView {
        let mut lines = Vec::new();
        lines.push(ViewLine::plain(
            LineRole::Title,
            format!("Fake News Detector  [{}]", self.tab.title()),
        ));
        match self.tab {
            Tab::Dashboard => self.dashboard_lines(&mut lines),
            Tab::Details => self.details_lines(&mut lines),
        }
        lines.push(ViewLine::plain(LineRole::Heading, String::new()));
        lines.push(ViewLine::plain(LineRole::Status, format!("Status: {}", self.status)));
        DashboardView { lines }
    }

    fn dashboard_lines(&self, lines: &mut Vec<ViewLine>) {
        let (real, fake) = self.chart;
        lines.push(ViewLine::plain(LineRole::Heading, "Prediction Confidence".to_string()));
        let total = real + fake;
        let real_cells = if total > 0.0 {
            ((real / total) * CHART_WIDTH as f64).round() as usize
        } else {
            CHART_WIDTH / 2
        };
        let real_cells = real_cells.min(CHART_WIDTH);
        lines.push(ViewLine {
            spans: vec![
                Span::new(LineRole::RealShare, "#".repeat(real_cells)),
                Span::new(LineRole::FakeShare, "#".repeat(CHART_WIDTH - real_cells)),
            ],
        });
        lines.push(ViewLine {
            spans: vec![
                Span::new(LineRole::RealShare, format!("Real {:.1}%", real * 100.0)),
                Span::new(LineRole::Body, "   ".to_string()),
                Span::new(LineRole::FakeShare, format!("Fake {:.1}%", fake * 100.0)),
            ],
        });

        lines.push(ViewLine::plain(LineRole::Heading, "Top Words".to_string()));
        match &self.report {
            Some(report) if !report.top_words.is_empty() => {
                for w in &report.top_words {
                    lines.push(ViewLine::plain(LineRole::Body, format!("{} - {} times", w.word, w.count)));
                }
            }
            Some(_) => lines.push(ViewLine::plain(LineRole::Muted, NO_SIGNIFICANT_WORDS.to_string())),
            None => {}
        }

        lines.push(ViewLine::plain(LineRole::Heading, "Input".to_string()));
        if self.text.is_empty() {
            lines.push(ViewLine::plain(LineRole::Muted, INPUT_PLACEHOLDER.to_string()));
        } else {
            let total_lines = self.text.lines().count();
            for ln in self.text.lines().take(INPUT_PREVIEW_LINES) {
                lines.push(ViewLine::plain(LineRole::Body, ln.to_string()));
            }
            if total_lines > INPUT_PREVIEW_LINES {
                lines.push(ViewLine::plain(
                    LineRole::Muted,
                    format!("... ({} more lines)", total_lines - INPUT_PREVIEW_LINES),
                ));
            }
        }

        if self.processing {
            lines.push(ViewLine::plain(LineRole::Muted, STATUS_PROCESSING.to_string()));
        }
    }

    fn details_lines(&self, lines: &mut Vec<ViewLine>) {
        lines.push(ViewLine::plain(LineRole::Heading, "Prediction Details".to_string()));
        match &self.report {
            Some(report) => {
                let d = report.detection;
                lines.push(ViewLine::plain(LineRole::Body, format!("Prediction: {}", d.label)));
                lines.push(ViewLine::plain(
                    LineRole::RealShare,
                    format!("Real: {:.2}%", d.real_probability * 100.0),
                ));
                lines.push(ViewLine::plain(
                    LineRole::FakeShare,
                    format!("Fake: {:.2}%", d.fake_probability * 100.0),
                ));
            }
            None => lines.push(ViewLine::plain(LineRole::Muted, NO_DETAILS.to_string())),
        }

        lines.push(ViewLine::plain(LineRole::Heading, "Summary".to_string()));
        if let Some(report) = &self.report {
            lines.push(ViewLine::plain(LineRole::Body, report.summary.clone()));
        }

        if let Some(batch) = &self.batch {
            lines.push(ViewLine::plain(LineRole::Heading, "CSV Batch".to_string()));
            lines.push(ViewLine::plain(
                LineRole::Body,
                format!(
                    "Rows: {} (fake {}, real {}, unknown {})",
                    batch.count, batch.fake_count, batch.real_count, batch.unknown_count
                ),
            ));
            lines.push(ViewLine::plain(
                LineRole::Body,
                format!("Average fake probability: {:.2}%", batch.avg_fake_probability * 100.0),
            ));
            lines.push(ViewLine::plain(
                LineRole::Body,
                format!("Highest fake probability: {:.2}%", batch.max_fake_probability * 100.0),
            ));
        }
    }
}

// ============ View ============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Title,
    Heading,
    Body,
    Muted,
    Status,
    RealShare,
    FakeShare,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub role: LineRole,
    pub text: String,
}

impl Span {
    fn new(role: LineRole, text: String) -> Self {
        Self { role, text }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewLine {
    pub spans: Vec<Span>,
}

impl ViewLine {
    fn plain(role: LineRole, text: String) -> Self {
        Self { spans: vec![Span::new(role, text)] }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Uncolored render of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub lines: Vec<ViewLine>,
}

impl DashboardView {
    pub fn plain_text(&self) -> String {
        self.lines.iter().map(|l| l.text()).collect::<Vec<_>>().join("\n")
    }

    /// Render with the theme's palette as truecolor ANSI
    pub fn paint(&self, theme: Theme) -> String {
        let palette = theme.palette();
        let rgb = |hex: &str| hex_to_rgb(hex).unwrap_or((128, 128, 128));
        let (tr, tg, tb) = rgb(palette.text);
        let (br, bg, bb) = rgb(palette.bg);
        let (rr, rg, rb) = rgb(palette.pie_real);
        let (fr, fg, fb) = rgb(palette.pie_fake);

        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| {
                        let text = span.text.as_str();
                        let styled = match span.role {
                            LineRole::Title => text.truecolor(tr, tg, tb).bold().underline(),
                            LineRole::Heading => text.truecolor(tr, tg, tb).bold(),
                            LineRole::Body => text.truecolor(tr, tg, tb),
                            LineRole::Muted | LineRole::Status => text.truecolor(tr, tg, tb).dimmed(),
                            LineRole::RealShare => text.truecolor(rr, rg, rb).bold(),
                            LineRole::FakeShare => text.truecolor(fr, fg, fb).bold(),
                        };
                        styled.on_truecolor(br, bg, bb).to_string()
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
