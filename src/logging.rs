//! Structured logging setup.
//!
//! Log output goes to stderr. Stdout is reserved for skip diagnostics and
//! the run summary, so the two can be separated in scripts.
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `XPDO_OAS_LOG_LEVEL` | trace, debug, info, warn, error | `warn` |
//! | `XPDO_OAS_LOG_FORMAT` | json, pretty, compact | `compact` |
//!
//! `RUST_LOG` takes precedence over `XPDO_OAS_LOG_LEVEL` when set.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub const LOG_LEVEL_ENV: &str = "XPDO_OAS_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "XPDO_OAS_LOG_FORMAT";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_level: lookup(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            format: lookup(LOG_FORMAT_ENV)
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
        }
    }

    /// Raise the level to at least `info` (used by `--verbose`).
    pub fn verbose(mut self) -> Self {
        let level = self.level();
        if level == Level::WARN || level == Level::ERROR {
            self.log_level = "info".to_string();
        }
        self
    }

    fn level(&self) -> Level {
        match self.log_level.trim().to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let level = config.level();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
