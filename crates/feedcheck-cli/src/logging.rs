//! Logging setup on `tracing-subscriber`.
//!
//! Levels used across the workspace:
//!
//! - `warn`: unpaired files, missing reference headers
//! - `info`: per-template progress, summary counts
//! - `debug`: per-check outcomes, file listing
//!
//! `RUST_LOG` overrides the configured level unless a level flag was given.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events follow the configured level; others stay at `warn`.
const WORKSPACE_CRATES: &[&str] = &[
    "feedcheck",
    "feedcheck_cli",
    "feedcheck_ingest",
    "feedcheck_model",
    "feedcheck_standards",
    "feedcheck_validate",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may replace `level_filter`.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Log destination; stderr when unset.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event, span close events included.
    Json,
}

impl LogConfig {
    #[must_use]
    pub fn new(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }

    #[must_use]
    pub fn with_env_filter(mut self, enable: bool) -> Self {
        self.use_env_filter = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Log files never get ANSI escapes.
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.with_ansi = false;
        }
        self.log_file = path;
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(LevelFilter::WARN)
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(false)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .without_time()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .without_time()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(build_env_filter(config))
        .init();
    Ok(())
}

/// Filter directives for the workspace crates at `level`.
pub fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(WORKSPACE_CRATES.iter().map(|krate| format!("{krate}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_warn_with_env_override() {
        let config = LogConfig::default();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn log_file_disables_ansi() {
        let config = LogConfig::new(LevelFilter::INFO)
            .with_ansi(true)
            .with_log_file(Some(PathBuf::from("feedcheck.log")));
        assert!(!config.with_ansi);

        let config = LogConfig::new(LevelFilter::INFO).with_log_file(None);
        assert!(config.with_ansi);
    }

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("feedcheck_validate=debug"));
        assert!(directives.contains("feedcheck_ingest=debug"));
    }
}
