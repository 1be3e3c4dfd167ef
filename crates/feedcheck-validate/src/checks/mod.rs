//! Per-file check modules.
//!
//! The file format check reads the raw bytes; every other check consumes
//! a fresh record stream and returns the issues it found.

pub mod file;
pub mod format;
pub mod primary_key;
pub mod required;
pub mod unit_type;

use feedcheck_ingest::Record;
use feedcheck_model::{HeaderDefinition, Issue};

/// Record stream consumed by a content check.
pub type Records<'a> = &'a mut dyn Iterator<Item = feedcheck_ingest::Result<Record>>;

/// Visit every record, collecting issues. A read error ends the scan with
/// an [`Issue::UnreadableRecord`].
pub(crate) fn scan<F>(records: Records<'_>, mut visit: F) -> Vec<Issue>
where
    F: FnMut(&Record, &mut Vec<Issue>),
{
    let mut issues = Vec::new();
    for result in records {
        match result {
            Ok(record) => visit(&record, &mut issues),
            Err(err) => {
                issues.push(Issue::UnreadableRecord {
                    line: err.line(),
                    reason: err.to_string(),
                });
                break;
            }
        }
    }
    issues
}

/// Configured columns absent from the reference header.
pub fn unknown_columns<'a, I>(header: &HeaderDefinition, columns: I) -> Vec<Issue>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut issues: Vec<Issue> = Vec::new();
    for column in columns {
        let already = issues
            .iter()
            .any(|issue| matches!(issue, Issue::UnknownColumn { column: c, .. } if c == column));
        if !header.contains(column) && !already {
            issues.push(Issue::UnknownColumn {
                template: header.template().to_string(),
                column: column.clone(),
            });
        }
    }
    issues
}
