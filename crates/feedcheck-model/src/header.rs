//! Ordered column names of a template.

use std::sync::Arc;

/// Header definition for a template: the authoritative column order.
///
/// Cloning is cheap; the column list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDefinition {
    template: String,
    columns: Arc<[String]>,
}

impl HeaderDefinition {
    pub fn new(template: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            template: template.into(),
            columns: columns.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Field position of `column`.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }
}
