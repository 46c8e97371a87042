// Centralized tracing setup: runtime log levels, optional JSON file logging
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock; // For global file guard

use eyre::{Result, WrapErr};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    EnvFilter,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

const CRATE_TARGET: &str = "portfolio_rebalance_core";
const LOG_DIR: &str = "logs";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Log levels and sinks, read from `CONSOLE_LOG_LEVEL`, `FILE_LOG_LEVEL` and `LOG_TO_FILE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub console_log_level: String,
    pub file_log_level: String,
    pub log_to_file: bool,
}

impl LoggingSettings {
    /// Reads the process environment. Load `.env` before calling this.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            console_log_level: lookup("CONSOLE_LOG_LEVEL").unwrap_or_else(|| "INFO".to_string()),
            file_log_level: lookup("FILE_LOG_LEVEL").unwrap_or_else(|| "INFO".to_string()),
            log_to_file: lookup("LOG_TO_FILE").is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
        }
    }
}

pub fn init_logging(bin_name: String) -> Result<()> {
    init_logging_with(bin_name, LoggingSettings::from_env())
}

pub fn init_logging_with(bin_name: String, settings: LoggingSettings) -> Result<()> {
    let LoggingSettings {
        console_log_level,
        file_log_level,
        log_to_file,
    } = settings;

    // Binaries log under their own target as well as the library's
    let console_layer = fmt::Layer::new()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(crate_filter(&bin_name, &console_log_level));

    if log_to_file {
        let log_dir = Path::new(LOG_DIR);
        fs::create_dir_all(log_dir).wrap_err("Failed to create log directory")?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
        let log_file_name = format!("{}_{}.log", bin_name, timestamp);

        let file_appender = tracing_appender::rolling::never(log_dir, log_file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        FILE_GUARD.set(guard).ok();

        // File layer: structured JSON with UTC timestamps
        let file_layer = fmt::Layer::new()
            .json()
            .with_writer(non_blocking)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_filter(crate_filter(&bin_name, &file_log_level));

        tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .wrap_err("Failed to set global tracing subscriber")?;
    } else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .wrap_err("Failed to set global tracing subscriber")?;
    }

    Ok(())
}

// Everything else stays at warn
fn crate_filter(bin_name: &str, level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("warn,{}={},{}={}", CRATE_TARGET, level, bin_name, level))
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=info", CRATE_TARGET)))
}
