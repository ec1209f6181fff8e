// Configuration Storage Service
// Handles config file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::Theme;
use crate::services::detection::scorer::DEFAULT_KEYWORDS;
use crate::services::word_frequency::DEFAULT_TOP_WORDS;

const MAX_BACKUPS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub last_import_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            theme: Theme::default(),
            detection: DetectionConfig::default(),
            last_import_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    #[serde(default = "default_top_words_limit")]
    pub top_words_limit: usize,
    /// Artificial delay before a dashboard detection completes
    #[serde(default = "default_processing_delay")]
    pub processing_delay_ms: u64,
    /// Fixed RNG seed for reproducible scores
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            top_words_limit: DEFAULT_TOP_WORDS,
            processing_delay_ms: 900,
            seed: None,
        }
    }
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_keywords() -> Vec<String> { DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect() }
fn default_top_words_limit() -> usize { DEFAULT_TOP_WORDS }
fn default_processing_delay() -> u64 { 900 }

impl AppConfig {
    /// Apply FAKE_NEWS_SEED / FAKE_NEWS_DELAY_MS overrides; unparsable values are ignored
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = std::env::var("FAKE_NEWS_SEED").ok().and_then(|v| v.trim().parse().ok()) {
            self.detection.seed = Some(seed);
        }
        if let Some(delay) = std::env::var("FAKE_NEWS_DELAY_MS").ok().and_then(|v| v.trim().parse().ok()) {
            self.detection.processing_delay_ms = delay;
        }
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fake-news-detector"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> AppResult<()> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| AppError::Config(format!("Failed to create config dir: {}", e)))
    }

    /// Load configuration from file; a missing file yields the defaults
    pub fn load(&self) -> AppResult<AppConfig> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| AppError::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> AppResult<()> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;

        fs::write(&self.config_file, content)
            .map_err(|e| AppError::Config(format!("Failed to write config: {}", e)))
    }

    /// Create a backup of current config
    fn create_backup(&self) -> AppResult<()> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir)
            .map_err(|e| AppError::Config(format!("Failed to create backup dir: {}", e)))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file)
            .map_err(|e| AppError::Config(format!("Failed to create backup: {}", e)))?;

        self.cleanup_old_backups(&backup_dir, MAX_BACKUPS)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> AppResult<()> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Timestamped names sort oldest first
        entries.sort_by_key(|e| e.file_name());

        let remove_count = entries.len() - keep;
        for entry in entries.iter().take(remove_count) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
