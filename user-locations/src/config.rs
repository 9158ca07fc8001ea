//! Command line / environment configuration and logging setup

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";
pub const DEFAULT_LOG_FILTER: &str = "user_locations=info,slice_dispatch_core=info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("timeout must be at least one second")]
    ZeroTimeout,

    #[error("unsupported API url scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot install log subscriber: {0}")]
    Subscriber(String),
}

/// Browse and register user locations
#[derive(Parser, Debug, Clone)]
#[command(name = "user-locations", version)]
pub struct Config {
    /// Base URL of the user location API
    #[arg(long, env = "USER_LOCATIONS_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Request timeout in seconds
    #[arg(long, env = "USER_LOCATIONS_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, env = "USER_LOCATIONS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Use a built-in in-memory backend instead of the API
    #[arg(long)]
    pub offline: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        match self.api_url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Install a file-backed fmt subscriber
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_logging(path: &Path) -> Result<(), ConfigError> {
    let file = File::create(path).map_err(|source| ConfigError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| ConfigError::Subscriber(e.to_string()))
}
