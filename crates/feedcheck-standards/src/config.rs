//! Feed configuration.
//!
//! Paths and template rules are resolved once at start-up into an
//! immutable [`FeedConfig`]. A TOML file may override the defaults:
//!
//! ```toml
//! source_dir = "source"
//! headers_dir = "fixtures/headers"
//!
//! [[template]]
//! name = "TXTA"
//! primary_key = ["ORDERID", "LINENUMBER", "SUBLINENUMBER", "EVENTTYPEID"]
//! required = ["PAYEEID", "PAYEETYPE", "POSITIONNAME", "TITLENAME"]
//! required_any_of = ["PAYEEID", "POSITIONNAME", "TITLENAME"]
//! key_includes_required = true
//!
//! [[template.dependency]]
//! trigger = "PAYEEID"
//! requires = "PAYEETYPE"
//!
//! [[pair]]
//! parent = "TXSTA"
//! child = "TXTA"
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::debug;

use feedcheck_model::{Dependency, KeyScope, RequiredPolicy, TemplatePair, TemplateRules};

use crate::error::{Result, StandardsError};
use crate::registry::{builtin_pairs, builtin_templates};

/// Default data file directory, relative to the configuration root.
pub const DEFAULT_SOURCE_DIR: &str = "source";
/// Default reference header directory, relative to the configuration root.
pub const DEFAULT_HEADERS_DIR: &str = "fixtures/headers";

static INSTALLED: OnceLock<FeedConfig> = OnceLock::new();

/// Process configuration: where to look and what to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub source_dir: PathBuf,
    pub headers_dir: PathBuf,
    pub templates: Vec<TemplateRules>,
    pub pairs: Vec<TemplatePair>,
}

impl FeedConfig {
    /// Built-in templates with the default directories under `root`.
    pub fn default_for(root: &Path) -> Self {
        Self {
            source_dir: root.join(DEFAULT_SOURCE_DIR),
            headers_dir: root.join(DEFAULT_HEADERS_DIR),
            templates: builtin_templates(),
            pairs: builtin_pairs(),
        }
    }

    /// Load a TOML configuration file. Relative paths resolve against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| StandardsError::io(path, err))?;
        let raw: RawConfig = toml::from_str(&text).map_err(|source| StandardsError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        let config = raw.resolve(root)?;
        debug!(
            path = %path.display(),
            templates = config.templates.len(),
            pairs = config.pairs.len(),
            "loaded feed configuration"
        );
        Ok(config)
    }

    #[must_use]
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_headers_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.headers_dir = dir.into();
        self
    }

    /// Keep only the named templates (case-insensitive) and the pairs
    /// whose two templates both remain.
    pub fn retain_templates(mut self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self);
        }
        for name in names {
            if self.template(name).is_none() {
                return Err(StandardsError::UnknownTemplate {
                    template: name.clone(),
                });
            }
        }
        self.templates
            .retain(|rules| names.iter().any(|name| name.eq_ignore_ascii_case(&rules.name)));
        let kept: Vec<String> = self.templates.iter().map(|t| t.name.clone()).collect();
        self.pairs.retain(|pair| {
            kept.iter().any(|name| name.eq_ignore_ascii_case(&pair.parent))
                && kept.iter().any(|name| name.eq_ignore_ascii_case(&pair.child))
        });
        Ok(self)
    }

    pub fn template(&self, name: &str) -> Option<&TemplateRules> {
        self.templates
            .iter()
            .find(|rules| rules.name.eq_ignore_ascii_case(name))
    }
}

/// Install `config` as the process-wide configuration.
///
/// # Errors
///
/// Fails if a configuration was already installed.
pub fn install_config(config: FeedConfig) -> Result<&'static FeedConfig> {
    INSTALLED
        .set(config)
        .map_err(|_| StandardsError::ConfigAlreadyInstalled)?;
    INSTALLED.get().ok_or(StandardsError::ConfigAlreadyInstalled)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    source_dir: Option<PathBuf>,
    headers_dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    include_builtin: bool,
    #[serde(default, rename = "template")]
    templates: Vec<RawTemplate>,
    #[serde(default, rename = "pair")]
    pairs: Vec<TemplatePair>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTemplate {
    name: String,
    #[serde(default)]
    primary_key: Vec<String>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    numbers: Vec<String>,
    #[serde(default)]
    dates: Vec<String>,
    #[serde(default)]
    booleans: Vec<String>,
    #[serde(default)]
    required_any_of: Vec<String>,
    #[serde(default, rename = "dependency")]
    dependencies: Vec<Dependency>,
    #[serde(default)]
    key_includes_required: bool,
}

fn default_true() -> bool {
    true
}

impl RawConfig {
    fn resolve(self, root: &Path) -> Result<FeedConfig> {
        let mut config = if self.include_builtin {
            FeedConfig::default_for(root)
        } else {
            FeedConfig {
                templates: Vec::new(),
                pairs: Vec::new(),
                ..FeedConfig::default_for(root)
            }
        };
        if let Some(dir) = self.source_dir {
            config.source_dir = root.join(dir);
        }
        if let Some(dir) = self.headers_dir {
            config.headers_dir = root.join(dir);
        }
        for raw in self.templates {
            let rules = raw.into_rules()?;
            match config
                .templates
                .iter_mut()
                .find(|existing| existing.name.eq_ignore_ascii_case(&rules.name))
            {
                Some(existing) => *existing = rules,
                None => config.templates.push(rules),
            }
        }
        for pair in self.pairs {
            if !config.pairs.contains(&pair) {
                config.pairs.push(pair);
            }
        }
        Ok(config)
    }
}

impl RawTemplate {
    fn into_rules(self) -> Result<TemplateRules> {
        let name = self.name.trim().to_uppercase();
        if name.is_empty() {
            return Err(StandardsError::InvalidTemplate {
                template: self.name,
                message: "name must not be empty".to_string(),
            });
        }
        if self.required_any_of.is_empty() && !self.dependencies.is_empty() {
            return Err(StandardsError::InvalidTemplate {
                template: name,
                message: "dependencies need required_any_of".to_string(),
            });
        }
        let required_policy = if self.required_any_of.is_empty() {
            RequiredPolicy::All
        } else {
            RequiredPolicy::AnyOf {
                columns: self.required_any_of,
                dependencies: self.dependencies,
            }
        };
        let key_scope = if self.key_includes_required {
            KeyScope::PrimaryKeyAndRequired
        } else {
            KeyScope::PrimaryKey
        };
        Ok(TemplateRules {
            name,
            primary_key: self.primary_key,
            required: self.required,
            numbers: self.numbers,
            dates: self.dates,
            booleans: self.booleans,
            required_policy,
            key_scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedcheck.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn empty_file_gives_builtins() {
        let (dir, path) = write_config("");
        let config = FeedConfig::load(&path).unwrap();
        assert_eq!(config, FeedConfig::default_for(dir.path()));
    }

    #[test]
    fn relative_dirs_resolve_against_config() {
        let (dir, path) = write_config("source_dir = \"in\"\nheaders_dir = \"hdr\"\n");
        let config = FeedConfig::load(&path).unwrap();
        assert_eq!(config.source_dir, dir.path().join("in"));
        assert_eq!(config.headers_dir, dir.path().join("hdr"));
    }

    #[test]
    fn configured_template_replaces_builtin() {
        let (_dir, path) = write_config(
            r#"
[[template]]
name = "ogpo"
primary_key = ["POSITIONNAME"]
"#,
        );
        let config = FeedConfig::load(&path).unwrap();
        let ogpo = config.template("OGPO").unwrap();
        assert!(ogpo.dates.is_empty());
        assert_eq!(config.templates.len(), 3);
    }

    #[test]
    fn any_of_template_with_dependency() {
        let (_dir, path) = write_config(
            r#"
include_builtin = false

[[template]]
name = "ASSIGN"
required = ["PAYEEID", "PAYEETYPE"]
required_any_of = ["PAYEEID"]
key_includes_required = true

[[template.dependency]]
trigger = "PAYEEID"
requires = "PAYEETYPE"

[[pair]]
parent = "STATUS"
child = "ASSIGN"
"#,
        );
        let config = FeedConfig::load(&path).unwrap();
        assert_eq!(config.templates.len(), 1);
        let rules = &config.templates[0];
        assert_eq!(rules.key_scope, KeyScope::PrimaryKeyAndRequired);
        assert_eq!(
            rules.required_policy,
            RequiredPolicy::AnyOf {
                columns: vec!["PAYEEID".to_string()],
                dependencies: vec![Dependency::new("PAYEEID", "PAYEETYPE")],
            }
        );
        assert_eq!(config.pairs, vec![TemplatePair::new("STATUS", "ASSIGN")]);
    }

    #[test]
    fn dependency_without_any_of_is_rejected() {
        let (_dir, path) = write_config(
            r#"
[[template]]
name = "BAD"

[[template.dependency]]
trigger = "A"
requires = "B"
"#,
        );
        let err = FeedConfig::load(&path).unwrap_err();
        assert!(matches!(err, StandardsError::InvalidTemplate { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("sourcedir = \"x\"\n");
        assert!(matches!(
            FeedConfig::load(&path).unwrap_err(),
            StandardsError::Toml { .. }
        ));
    }

    #[test]
    fn retain_templates_drops_broken_pairs() {
        let config = FeedConfig::default_for(Path::new("."))
            .retain_templates(&["txsta".to_string()])
            .unwrap();
        assert_eq!(config.templates.len(), 1);
        assert!(config.pairs.is_empty());

        let err = FeedConfig::default_for(Path::new("."))
            .retain_templates(&["NOPE".to_string()])
            .unwrap_err();
        assert!(matches!(err, StandardsError::UnknownTemplate { .. }));
    }
}
