//! Primary key checks.

use std::collections::HashSet;

use feedcheck_ingest::Record;
use feedcheck_model::Issue;

use super::{Records, scan};

/// Every primary key column is filled and the key is unique per record.
pub fn check(primary_key: &[String], records: Records<'_>) -> Vec<Issue> {
    check_scoped(primary_key, primary_key, records, |_, _| {})
}

/// Like [`check`], but uniqueness is judged over `key_columns` and
/// `row_rules` adds per-record issues of its own.
pub fn check_scoped<F>(
    primary_key: &[String],
    key_columns: &[String],
    records: Records<'_>,
    mut row_rules: F,
) -> Vec<Issue>
where
    F: FnMut(&Record, &mut Vec<Issue>),
{
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    scan(records, |record, issues| {
        if primary_key.iter().any(|column| !record.is_filled(column)) {
            issues.push(Issue::EmptyPrimaryKey {
                line: record.line(),
                values: record.values_of(primary_key),
            });
            row_rules(record, issues);
            return;
        }
        row_rules(record, issues);

        let key: Vec<String> = key_columns
            .iter()
            .map(|column| record.value(column).to_string())
            .collect();
        if !seen.insert(key.clone()) {
            issues.push(Issue::DuplicatePrimaryKey {
                line: record.line(),
                key,
            });
        }
    })
}
