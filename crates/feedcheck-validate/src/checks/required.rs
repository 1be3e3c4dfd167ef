//! Required column checks.

use feedcheck_ingest::Record;
use feedcheck_model::{Dependency, Issue};

use super::{Records, scan};

/// Every required column is filled on every record.
pub fn check(required: &[String], records: Records<'_>) -> Vec<Issue> {
    scan(records, |record, issues| {
        if required.iter().any(|column| !record.is_filled(column)) {
            issues.push(Issue::MissingRequiredColumn {
                line: record.line(),
                values: record.values_of(required),
            });
        }
    })
}

/// At least one of `columns` is filled and every dependency holds.
pub fn check_any_of(
    columns: &[String],
    dependencies: &[Dependency],
    records: Records<'_>,
) -> Vec<Issue> {
    scan(records, |record, issues| {
        any_of_issues(record, columns, dependencies, issues);
    })
}

/// Per-record any-of and dependency rules.
pub(crate) fn any_of_issues(
    record: &Record,
    columns: &[String],
    dependencies: &[Dependency],
    issues: &mut Vec<Issue>,
) {
    if !columns.is_empty() && !columns.iter().any(|column| record.is_filled(column)) {
        issues.push(Issue::MissingAnyOf {
            line: record.line(),
            columns: columns.to_vec(),
            values: record.values_of(columns),
        });
    }
    for dependency in dependencies {
        if record.is_filled(&dependency.trigger) && !record.is_filled(&dependency.requires) {
            issues.push(Issue::MissingDependentColumn {
                line: record.line(),
                trigger: dependency.trigger.clone(),
                requires: dependency.requires.clone(),
                values: record
                    .values_of(&[dependency.trigger.clone(), dependency.requires.clone()]),
            });
        }
    }
}
