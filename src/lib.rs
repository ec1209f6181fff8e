pub mod error;
pub mod models;
pub mod services;
pub mod api;
pub mod shell;

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::models::Theme;
use crate::services::{AppConfig, ConfigStore};

static PROCESS_START: OnceLock<Instant> = OnceLock::new();
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "fakeNews_";
const LOG_FILES_KEPT: usize = 30;

fn startup_elapsed_ms() -> u128 {
    PROCESS_START
        .get()
        .map(|t| t.elapsed().as_millis())
        .unwrap_or(0)
}

fn env_truthy(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

/// Terminal dashboard for the fake news detector
#[derive(Debug, Parser)]
#[command(name = "fake-news-detector", version, about)]
pub struct Cli {
    /// Directory holding config.json (defaults to the user config dir)
    #[arg(long, env = "FAKE_NEWS_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
    /// Start with this theme (dark or light)
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<Theme>,
    /// Artificial processing delay for detections, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
    /// Seed the scorer's random draw for reproducible results
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_theme(val: &str) -> Result<Theme, String> {
    Theme::from_name(val).ok_or_else(|| format!("unknown theme '{}', expected dark or light", val))
}

impl Cli {
    /// Command-line options win over env overrides, which win over the config file
    pub fn apply(&self, config: &mut AppConfig) {
        config.apply_env_overrides();
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(delay) = self.delay_ms {
            config.detection.processing_delay_ms = delay;
        }
        if let Some(seed) = self.seed {
            config.detection.seed = Some(seed);
        }
    }

    pub fn config_store(&self) -> ConfigStore {
        let dir = self
            .config_dir
            .clone()
            .or_else(ConfigStore::default_config_dir)
            .unwrap_or_else(|| PathBuf::from(".fake-news-detector"));
        ConfigStore::new(dir)
    }
}

/// Initialize logging system with timestamped log files
pub fn init_logging() {
    let disable_file_log = env_truthy("FAKE_NEWS_DISABLE_FILE_LOG");
    let disable_cleanup = env_truthy("FAKE_NEWS_DISABLE_LOG_CLEANUP");

    // Configure subscriber filter as early as possible (so fallback logging is consistent).
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if disable_file_log {
        init_console_only_logging(env_filter);
        info!("File logging disabled via FAKE_NEWS_DISABLE_FILE_LOG");
        return;
    }

    let logs_dir = match std::env::var("FAKE_NEWS_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => get_logs_dir(),
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Failed to create logs directory: {}", e);
        init_console_only_logging(env_filter);
        info!("Falling back to console-only logging (log dir not writable)");
        return;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("{}{}.log", LOG_FILE_PREFIX, timestamp);

    // One file per session; writes go through a non-blocking worker.
    let file_appender = rolling::never(&logs_dir, &log_filename);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(file_guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        // stderr keeps the dashboard on stdout readable
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(console_layer)
            .try_init();
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .try_init();
    }

    info!("=== Fake News Detector Started ===");
    info!("Log file: {}/{}", logs_dir.display(), log_filename);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if !disable_cleanup {
        std::thread::spawn(move || {
            cleanup_old_logs(&logs_dir, LOG_FILES_KEPT);
        });
    }
}

/// Get the logs directory path
fn get_logs_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("logs")
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(data_dir) = dirs::data_local_dir() {
            return data_dir.join("fake-news-detector").join("logs");
        }
        PathBuf::from("logs")
    }
}

/// Delete all but the newest `keep` session log files
pub fn cleanup_old_logs(logs_dir: &Path, keep: usize) {
    let mut entries: Vec<_> = match fs::read_dir(logs_dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(_) => return,
    };

    entries.retain(|e| {
        let name = e.file_name().to_string_lossy().to_string();
        name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")
    });

    if entries.len() <= keep {
        return;
    }

    // Timestamped names sort oldest first
    entries.sort_by_key(|e| e.file_name());

    let remove_count = entries.len().saturating_sub(keep);
    for entry in entries.into_iter().take(remove_count) {
        let _ = fs::remove_file(entry.path());
    }
}

fn init_console_only_logging(env_filter: EnvFilter) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    PROCESS_START.get_or_init(Instant::now);
    let cli = Cli::parse();

    let logging_t0 = Instant::now();
    init_logging();
    info!(startup_ms = startup_elapsed_ms(), logging_ms = logging_t0.elapsed().as_millis(), "logging.initialized");

    let store = cli.config_store();
    let mut config = match api::get_config(&store) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "config.load_failed, using defaults");
            AppConfig::default()
        }
    };
    cli.apply(&mut config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(shell::Shell::new(store, config).run())?;

    info!(startup_ms = startup_elapsed_ms(), "=== Fake News Detector Exited ===");
    Ok(())
}
