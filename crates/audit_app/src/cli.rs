//! Command line options.

use std::path::PathBuf;
use std::time::Duration;

use audit_engine::AuditConfig;
use audit_logging::{LevelFilter, LogDestination, DEFAULT_LOG_FILE};
use clap::{Parser, ValueEnum};

/// Checks every managed endpoint's CPU against a list of supported models
/// and writes a compatibility report.
///
/// Credentials come from CONNECTWISE_CLIENT_ID and CONNECTWISE_ACCESS_TOKEN,
/// in the environment or in the `--env-file`.
#[derive(Debug, Parser)]
#[command(name = "cpu-audit", version)]
pub struct Cli {
    /// CSV of supported CPUs (Manufacturer, ProductLine, Model).
    #[arg(long, default_value = "cpu_support.csv")]
    pub reference: PathBuf,

    /// Where to write the compatibility report.
    #[arg(long, default_value = "windows_11_compatibility.csv")]
    pub output: PathBuf,

    /// Optional file of KEY=VALUE lines consulted for credentials.
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Inventory API base URL; defaults to the built-in endpoint.
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// Concurrent processor lookups.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: u64,

    /// Attempts per processor lookup before giving up on a device.
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Upper bound on a single retry wait, in seconds.
    #[arg(long)]
    pub max_backoff_secs: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Also write logs to this file.
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_LOG_FILE)]
    pub log_file: Option<PathBuf>,

    /// Log only to the log file, not the terminal.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match (&self.log_file, self.quiet) {
            (Some(path), false) => LogDestination::Both(path.clone()),
            (Some(path), true) => LogDestination::File(path.clone()),
            (None, true) => LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE)),
            (None, false) => LogDestination::Terminal,
        }
    }

    pub fn audit_config(&self) -> AuditConfig {
        let mut config = AuditConfig {
            reference_path: self.reference.clone(),
            output_path: self.output.clone(),
            ..AuditConfig::default()
        };
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        config.api.page_size = self.page_size;
        config.enrich.workers = usize::try_from(self.workers).unwrap_or(usize::MAX);
        config.enrich.retry.max_retries = self.max_retries;
        config.enrich.retry.max_delay = self.max_backoff_secs.map(Duration::from_secs);
        config
    }
}
