//! Reference header definitions.
//!
//! Each template has one reference artifact `<headers_dir>/<TEMPLATE>.txt`
//! whose first tab-delimited line is the authoritative column order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use csv::ReaderBuilder;
use tracing::debug;

use feedcheck_model::HeaderDefinition;

use crate::error::{Result, StandardsError};

/// Loads header definitions and caches them for the life of the store.
#[derive(Debug)]
pub struct HeaderStore {
    root: PathBuf,
    cache: Mutex<BTreeMap<String, HeaderDefinition>>,
}

impl HeaderStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(BTreeMap::new()),
        }
    }

    /// Header definition for `template`.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsError::MissingReferenceDefinition`] when no
    /// reference artifact exists for the template.
    pub fn load(&self, template: &str) -> Result<HeaderDefinition> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(header) = cache.get(template) {
            return Ok(header.clone());
        }
        let path = self.resolve(template)?;
        let header = read_header(template, &path)?;
        debug!(
            template,
            columns = header.len(),
            path = %path.display(),
            "loaded header definition"
        );
        cache.insert(template.to_string(), header.clone());
        Ok(header)
    }

    /// Path of the reference artifact, trying the name as given and then
    /// upper-cased.
    fn resolve(&self, template: &str) -> Result<PathBuf> {
        let exact = self.root.join(format!("{template}.txt"));
        if exact.is_file() {
            return Ok(exact);
        }
        let upper = self.root.join(format!("{}.txt", template.to_uppercase()));
        if upper.is_file() {
            return Ok(upper);
        }
        Err(StandardsError::MissingReferenceDefinition {
            template: template.to_string(),
            path: exact,
        })
    }
}

fn read_header(template: &str, path: &Path) -> Result<HeaderDefinition> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| StandardsError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| StandardsError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|name| name.trim_matches('\u{feff}').to_string())
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(StandardsError::EmptyHeader {
            template: template.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(HeaderDefinition::new(template, columns))
}
