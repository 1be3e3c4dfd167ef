//! Validation issue types.
//!
//! Each variant carries only the data it needs; `code()` groups variants
//! into the reporting taxonomy and `message()` renders the human-readable
//! text shown in reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(column, value)` pair as read from a record.
pub type ColumnValue = (String, String);

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Issue {
    // File checks
    /// Filename does not follow the feed naming convention.
    MalformedFilename { file_name: String },
    /// File is empty, unreadable or not valid UTF-8.
    UnreadableOrEmptyFile { reason: String },
    /// Lines without a single tab character.
    NotTabDelimited { lines: Vec<u64> },
    /// First line repeats the template header.
    DuplicatedHeaderRow { fields: Vec<String> },
    /// A record could not be read mid-file.
    UnreadableRecord { line: Option<u64>, reason: String },

    // Key checks
    /// A primary key component is empty.
    EmptyPrimaryKey { line: u64, values: Vec<ColumnValue> },
    /// A key tuple already seen earlier in the file.
    DuplicatePrimaryKey { line: u64, key: Vec<String> },

    // Presence checks
    /// Required columns left empty.
    MissingRequiredColumn { line: u64, values: Vec<ColumnValue> },
    /// None of the alternative required columns is filled.
    MissingAnyOf {
        line: u64,
        columns: Vec<String>,
        values: Vec<ColumnValue>,
    },
    /// A column required because another one is filled is empty.
    MissingDependentColumn {
        line: u64,
        trigger: String,
        requires: String,
        values: Vec<ColumnValue>,
    },
    /// Number filled without its unit type, or the other way around.
    MissingUnitType {
        line: u64,
        number: ColumnValue,
        unit_type: ColumnValue,
    },

    // Format checks
    InvalidNumberFormat { line: u64, values: Vec<ColumnValue> },
    InvalidDateFormat { line: u64, values: Vec<ColumnValue> },
    InvalidBooleanFormat { line: u64, values: Vec<ColumnValue> },

    // Definition checks
    /// No reference header definition for the template.
    MissingReferenceDefinition { template: String, reason: String },
    /// A configured column is not part of the template header.
    UnknownColumn { template: String, column: String },
    /// The reference header does not name the paired templates.
    TemplateNotInHeader {
        file_name: String,
        template: String,
        missing: Vec<String>,
    },

    // Cross-template checks
    /// A file of one paired template has no partner file.
    UnpairedFile { file_name: String, expected: String },
    /// A parent record with no child record.
    OrphanedParentRecord {
        line: u64,
        key: Vec<String>,
        child_file: String,
    },
    /// A child key with no parent record.
    OrphanedChildRecord {
        key: Vec<String>,
        parent_file: String,
    },
}

impl Issue {
    /// Taxonomy code for this issue.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::MalformedFilename { .. } => "MalformedFilename",
            Issue::UnreadableOrEmptyFile { .. } => "UnreadableOrEmptyFile",
            Issue::NotTabDelimited { .. } => "NotTabDelimited",
            Issue::DuplicatedHeaderRow { .. } => "DuplicatedHeaderRow",
            Issue::UnreadableRecord { .. } => "UnreadableRecord",
            Issue::EmptyPrimaryKey { .. } | Issue::DuplicatePrimaryKey { .. } => {
                "MissingOrDuplicatePrimaryKey"
            }
            Issue::MissingRequiredColumn { .. }
            | Issue::MissingAnyOf { .. }
            | Issue::MissingDependentColumn { .. } => "MissingRequiredColumn",
            Issue::MissingUnitType { .. } => "MissingUnitType",
            Issue::InvalidNumberFormat { .. } => "InvalidNumberFormat",
            Issue::InvalidDateFormat { .. } => "InvalidDateFormat",
            Issue::InvalidBooleanFormat { .. } => "InvalidBooleanFormat",
            Issue::MissingReferenceDefinition { .. } => "MissingReferenceDefinition",
            Issue::UnknownColumn { .. } => "UnknownColumn",
            Issue::TemplateNotInHeader { .. } => "TemplateNotInHeader",
            Issue::UnpairedFile { .. } => "UnpairedFile",
            Issue::OrphanedParentRecord { .. } => "OrphanedParentRecord",
            Issue::OrphanedChildRecord { .. } => "OrphanedChildRecord",
        }
    }

    /// Line number in the data file (1-based), when the issue is tied to one.
    pub fn line(&self) -> Option<u64> {
        match self {
            Issue::EmptyPrimaryKey { line, .. }
            | Issue::DuplicatePrimaryKey { line, .. }
            | Issue::MissingRequiredColumn { line, .. }
            | Issue::MissingAnyOf { line, .. }
            | Issue::MissingDependentColumn { line, .. }
            | Issue::MissingUnitType { line, .. }
            | Issue::InvalidNumberFormat { line, .. }
            | Issue::InvalidDateFormat { line, .. }
            | Issue::InvalidBooleanFormat { line, .. }
            | Issue::OrphanedParentRecord { line, .. } => Some(*line),
            Issue::UnreadableRecord { line, .. } => *line,
            _ => None,
        }
    }

    /// Format message with issue-specific data.
    pub fn message(&self) -> String {
        match self {
            Issue::MalformedFilename { file_name } => format!(
                "File name {file_name} does not match \
                 <TENANT>_<TEMPLATE>_<ENV>_<YYYYMMDD>[_<HHMISS>][_<TAG>].txt"
            ),
            Issue::UnreadableOrEmptyFile { reason } => {
                format!("File is empty or encoding is not unicode: {reason}")
            }
            Issue::NotTabDelimited { lines } => {
                format!("File not tab-delimited (lines {})", join_numbers(lines))
            }
            Issue::DuplicatedHeaderRow { fields } => {
                format!("File has header row [{}]", fields.join(", "))
            }
            Issue::UnreadableRecord { line, reason } => match line {
                Some(line) => format!("Line {line} could not be read: {reason}"),
                None => format!("Record could not be read: {reason}"),
            },
            Issue::EmptyPrimaryKey { values, .. } => {
                format!("Primary key empty {}", format_values(values))
            }
            Issue::DuplicatePrimaryKey { key, .. } => format!(
                "File has one or more rows with the same primary key {}",
                format_key(key)
            ),
            Issue::MissingRequiredColumn { values, .. } => {
                format!("Required column empty {}", format_values(values))
            }
            Issue::MissingAnyOf {
                columns, values, ..
            } => format!(
                "One of [{}] is required {}",
                columns.join(", "),
                format_values(values)
            ),
            Issue::MissingDependentColumn {
                trigger,
                requires,
                values,
                ..
            } => format!(
                "{requires} is required if {trigger} is provided {}",
                format_values(values)
            ),
            Issue::MissingUnitType {
                number, unit_type, ..
            } => format!(
                "Unit Type is required if corresponding number is provided \
                 {{{}: ('{}', '{}')}}",
                number.0, number.1, unit_type.1
            ),
            Issue::InvalidNumberFormat { values, .. } => format!(
                "Number value must be in format 12345.67 {}",
                format_values(values)
            ),
            Issue::InvalidDateFormat { values, .. } => format!(
                "Date value must be in format of MM/DD/YYYY {}",
                format_values(values)
            ),
            Issue::InvalidBooleanFormat { values, .. } => format!(
                "Boolean value must be either 0, 1 or empty {}",
                format_values(values)
            ),
            Issue::MissingReferenceDefinition { template, reason } => {
                format!("No reference header definition for template {template}: {reason}")
            }
            Issue::UnknownColumn { template, column } => {
                format!("Column {column} is not part of the {template} header")
            }
            Issue::TemplateNotInHeader {
                file_name,
                template,
                missing,
            } => format!(
                "Template name {} not found in {template} headers of {file_name}",
                missing.join(" and ")
            ),
            Issue::UnpairedFile {
                file_name,
                expected,
            } => format!("{file_name} has no matching file {expected}"),
            Issue::OrphanedParentRecord {
                key, child_file, ..
            } => format!(
                "Record {} has no matching record in {child_file}",
                format_key(key)
            ),
            Issue::OrphanedChildRecord { key, parent_file } => format!(
                "Record {} has no corresponding record in {parent_file}",
                format_key(key)
            ),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line() {
            Some(line) => write!(f, "line {line}: {}", self.message()),
            None => f.write_str(&self.message()),
        }
    }
}

/// Render column values as `{COLUMN: 'value', ...}`.
pub fn format_values(values: &[ColumnValue]) -> String {
    let body = values
        .iter()
        .map(|(column, value)| format!("{column}: '{value}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

/// Render a key tuple as `('A', '1')`.
pub fn format_key(key: &[String]) -> String {
    let body = key
        .iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("({body})")
}

fn join_numbers(numbers: &[u64]) -> String {
    numbers
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
