//! Template rule configuration.
//!
//! A template is a named file schema. Its rules are plain data: the
//! column lists for each role plus the policy used by the required-column
//! and primary-key checks.

use serde::{Deserialize, Serialize};

/// Prefix of the companion column holding the unit type for a number column.
pub const UNIT_TYPE_PREFIX: &str = "UNITTYPEFOR";

/// Name of the unit type column paired with `number_column`.
pub fn unit_type_column(number_column: &str) -> String {
    format!("{UNIT_TYPE_PREFIX}{number_column}")
}

/// A conditional requirement: when `trigger` is filled, `requires` must be too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub trigger: String,
    pub requires: String,
}

impl Dependency {
    pub fn new(trigger: impl Into<String>, requires: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            requires: requires.into(),
        }
    }
}

/// How the required-column list is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum RequiredPolicy {
    /// Every required column must be non-empty.
    #[default]
    All,
    /// At least one of `columns` must be non-empty, and every dependency
    /// whose trigger is filled must have its dependent filled.
    AnyOf {
        columns: Vec<String>,
        dependencies: Vec<Dependency>,
    },
}

/// Which columns make up the tuple checked for duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScope {
    #[default]
    PrimaryKey,
    /// Primary key columns followed by the required columns.
    PrimaryKeyAndRequired,
}

/// Declarative rule set for one template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRules {
    pub name: String,
    pub primary_key: Vec<String>,
    pub required: Vec<String>,
    pub numbers: Vec<String>,
    pub dates: Vec<String>,
    pub booleans: Vec<String>,
    #[serde(default)]
    pub required_policy: RequiredPolicy,
    #[serde(default)]
    pub key_scope: KeyScope,
}

impl TemplateRules {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = to_owned(columns);
        self
    }

    #[must_use]
    pub fn with_required(mut self, columns: &[&str]) -> Self {
        self.required = to_owned(columns);
        self
    }

    #[must_use]
    pub fn with_numbers(mut self, columns: &[&str]) -> Self {
        self.numbers = to_owned(columns);
        self
    }

    #[must_use]
    pub fn with_dates(mut self, columns: &[&str]) -> Self {
        self.dates = to_owned(columns);
        self
    }

    #[must_use]
    pub fn with_booleans(mut self, columns: &[&str]) -> Self {
        self.booleans = to_owned(columns);
        self
    }

    #[must_use]
    pub fn with_required_policy(mut self, policy: RequiredPolicy) -> Self {
        self.required_policy = policy;
        self
    }

    #[must_use]
    pub fn with_key_scope(mut self, scope: KeyScope) -> Self {
        self.key_scope = scope;
        self
    }

    /// Columns whose combined values must be unique per record.
    pub fn key_columns(&self) -> Vec<String> {
        match self.key_scope {
            KeyScope::PrimaryKey => self.primary_key.clone(),
            KeyScope::PrimaryKeyAndRequired => self
                .primary_key
                .iter()
                .chain(self.required.iter())
                .cloned()
                .collect(),
        }
    }

    /// `(number, unit type)` column pairs.
    pub fn unit_type_pairs(&self) -> Vec<(String, String)> {
        self.numbers
            .iter()
            .map(|column| (column.clone(), unit_type_column(column)))
            .collect()
    }
}

/// Two templates whose files are correlated by filename and whose records
/// share a leading key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePair {
    pub parent: String,
    pub child: String,
}

impl TemplatePair {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }

    /// Display label such as `TXSTA/TXTA`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.parent, self.child)
    }
}

fn to_owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|column| (*column).to_string()).collect()
}
