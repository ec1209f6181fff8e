// Interactive Dashboard Shell
// Reads commands from stdin, dispatches them as dashboard actions and performs the effects

use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::api;
use crate::error::AppResult;
use crate::models::Tab;
use crate::services::dashboard::{Action, DashboardState, Effect};
use crate::services::{build_model, AppConfig, ConfigStore, DetectionModel};

pub const HELP: &str = "\
Commands:
  detect                 analyze the current input
  clear                  empty the input
  text <line>            append a line to the input (plain lines are appended too)
  import <path>          load a .txt/.docx/.pdf file into the input
  csv <path> [column]    analyze every row of a CSV text column
  theme                  toggle dark/light
  tab dashboard|details  switch tab
  show                   redraw
  help                   this message
  quit                   exit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellInput {
    Action(Action),
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// Map one line typed at the prompt to a shell input
pub fn parse_input(line: &str) -> ShellInput {
    let trimmed = line.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (trimmed, ""),
    };

    match command.to_lowercase().as_str() {
        "" | "show" => ShellInput::Show,
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        "detect" => ShellInput::Action(Action::Detect),
        "clear" => ShellInput::Action(Action::Clear),
        "theme" => ShellInput::Action(Action::ToggleTheme),
        "text" => ShellInput::Action(Action::AppendText(rest.to_string())),
        "import" if !rest.is_empty() => ShellInput::Action(Action::ImportTextFile(PathBuf::from(rest))),
        "import" => ShellInput::Invalid("import needs a file path".to_string()),
        "csv" if !rest.is_empty() => {
            let mut parts = rest.split_whitespace();
            let path = parts.next().map(PathBuf::from).unwrap_or_default();
            let column = parts.next().map(|c| c.to_string());
            ShellInput::Action(Action::UploadCsv { path, column })
        }
        "csv" => ShellInput::Invalid("csv needs a file path".to_string()),
        "tab" => match Tab::from_name(rest) {
            Some(tab) => ShellInput::Action(Action::SwitchTab(tab)),
            None => ShellInput::Invalid(format!("unknown tab '{}'", rest)),
        },
        _ => ShellInput::Action(Action::AppendText(line.trim_end().to_string())),
    }
}

pub struct Shell {
    store: ConfigStore,
    config: AppConfig,
    model: Box<dyn DetectionModel>,
    state: DashboardState,
}

impl Shell {
    pub fn new(store: ConfigStore, config: AppConfig) -> Self {
        let model = build_model(&config.detection);
        let state = DashboardState::new(config.theme);
        Self { store, config, model, state }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    fn render(&self) {
        println!("{}\n", self.state.view().paint(self.state.theme()));
    }

    /// Dispatch one action and carry out the resulting effect
    pub async fn handle(&mut self, action: Action) {
        let effect = self.state.dispatch(action);
        match effect {
            Effect::None => {}
            Effect::RunDetection(text) => {
                self.render();
                // stands in for the window's deferred timer
                tokio::time::sleep(Duration::from_millis(self.config.detection.processing_delay_ms)).await;
                match api::detect_text_with_model(&text, self.model.as_mut(), &self.config) {
                    Ok(report) => self.state.finish_detection(report),
                    Err(e) => {
                        warn!(error = %e, "shell.detect_failed");
                        self.state.fail(&e.to_string());
                    }
                }
            }
            Effect::LoadTextFile(path) => match api::import_text_file(&path) {
                Ok(imported) => {
                    self.state.finish_import(imported);
                    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                        self.config.last_import_dir = Some(dir.display().to_string());
                        self.persist_config();
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "shell.import_failed");
                    self.state.fail(&e.to_string());
                }
            },
            Effect::LoadCsv { path, column } => {
                match api::upload_csv(&path, column.as_deref(), &self.config) {
                    Ok(report) => {
                        self.state.finish_csv(&report);
                        self.state.dispatch(Action::SwitchTab(Tab::Details));
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "shell.csv_failed");
                        self.state.fail(&e.to_string());
                    }
                }
            }
            Effect::PersistTheme(theme) => {
                self.config.theme = theme;
                self.persist_config();
            }
        }
    }

    fn persist_config(&self) {
        if let Err(e) = api::save_config(&self.store, &self.config) {
            warn!(error = %e, "config.save_failed");
        }
    }

    /// Read-dispatch-render loop until `quit` or end of input
    pub async fn run(mut self) -> AppResult<()> {
        info!(theme = ?self.config.theme, delay_ms = self.config.detection.processing_delay_ms, "shell.started");
        self.render();
        println!("{}\n", HELP);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_input(&line) {
                ShellInput::Quit => break,
                ShellInput::Help => {
                    println!("{}\n", HELP);
                    continue;
                }
                ShellInput::Invalid(message) => {
                    self.state.fail(&message);
                }
                ShellInput::Show => {}
                ShellInput::Action(action) => self.handle(action).await,
            }
            self.render();
        }

        info!("shell.stopped");
        Ok(())
    }
}
