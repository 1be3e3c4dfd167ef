//! File format check.
//!
//! Gates every content check: the filename must follow the naming
//! convention, the file must be readable UTF-8 text, every line must
//! contain a tab, and the first line must not repeat the header.

use std::path::Path;

use feedcheck_ingest::file_name;
use feedcheck_model::{HeaderDefinition, Issue};

use crate::patterns::is_valid_filename;

/// Run the file format check on `path`.
pub fn check(path: &Path, header: &HeaderDefinition) -> Vec<Issue> {
    let mut issues = Vec::new();

    let name = file_name(path);
    if !is_valid_filename(&name) {
        issues.push(Issue::MalformedFilename { file_name: name });
    }

    let content = match read_text(path) {
        Ok(content) => content,
        Err(reason) => {
            issues.push(Issue::UnreadableOrEmptyFile { reason });
            return issues;
        }
    };

    let untabbed: Vec<u64> = content
        .lines()
        .zip(1u64..)
        .filter(|(line, _)| !line.contains('\t'))
        .map(|(_, number)| number)
        .collect();
    if !untabbed.is_empty() {
        issues.push(Issue::NotTabDelimited { lines: untabbed });
    }

    if let Some(first) = content.lines().next() {
        let fields: Vec<&str> = first.split('\t').collect();
        if is_header_row(&fields, header) {
            issues.push(Issue::DuplicatedHeaderRow {
                fields: fields.iter().map(|field| (*field).to_string()).collect(),
            });
        }
    }

    issues
}

fn read_text(path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|err| err.to_string())?;
    if bytes.is_empty() {
        return Err("file is empty".to_string());
    }
    String::from_utf8(bytes).map_err(|err| format!("invalid UTF-8: {err}"))
}

/// A line repeats the header when it has at least one non-empty field and
/// every non-empty field is a header column name.
fn is_header_row(fields: &[&str], header: &HeaderDefinition) -> bool {
    let mut named = fields.iter().filter(|field| !field.is_empty()).peekable();
    named.peek().is_some() && named.all(|field| header.contains(field))
}
