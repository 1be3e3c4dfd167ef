//! Resolving the feed configuration from a file and command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use feedcheck_standards::FeedConfig;

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "feedcheck.toml";

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub headers_dir: Option<PathBuf>,
    pub templates: Vec<String>,
}

impl ConfigOverrides {
    /// Resolve the configuration relative to `cwd`.
    ///
    /// An explicit config file must exist; otherwise `feedcheck.toml` in
    /// `cwd` is used when present, and the built-in defaults when not.
    pub fn resolve(&self, cwd: &Path) -> Result<FeedConfig> {
        let mut config = match &self.config_file {
            Some(path) => FeedConfig::load(path)
                .with_context(|| format!("load configuration {}", path.display()))?,
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    FeedConfig::load(&candidate)
                        .with_context(|| format!("load configuration {}", candidate.display()))?
                } else {
                    FeedConfig::default_for(cwd)
                }
            }
        };
        if let Some(dir) = &self.source_dir {
            config = config.with_source_dir(cwd.join(dir));
        }
        if let Some(dir) = &self.headers_dir {
            config = config.with_headers_dir(cwd.join(dir));
        }
        let config = config
            .retain_templates(&self.templates)
            .context("select templates")?;
        debug!(
            source = %config.source_dir.display(),
            headers = %config.headers_dir.display(),
            templates = config.templates.len(),
            "resolved configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config = ConfigOverrides::default().resolve(dir.path()).unwrap();
        assert_eq!(config, FeedConfig::default_for(dir.path()));
    }

    #[test]
    fn picks_up_config_in_working_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "source_dir = \"feeds\"\n").unwrap();
        let config = ConfigOverrides::default().resolve(dir.path()).unwrap();
        assert_eq!(config.source_dir, dir.path().join("feeds"));
    }

    #[test]
    fn flags_override_file() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            source_dir: Some(PathBuf::from("in")),
            templates: vec!["ogpo".to_string()],
            ..ConfigOverrides::default()
        };
        let config = overrides.resolve(dir.path()).unwrap();
        assert_eq!(config.source_dir, dir.path().join("in"));
        assert_eq!(config.templates.len(), 1);
        assert!(config.pairs.is_empty());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config_file: Some(dir.path().join("absent.toml")),
            ..ConfigOverrides::default()
        };
        assert!(overrides.resolve(dir.path()).is_err());
    }
}
