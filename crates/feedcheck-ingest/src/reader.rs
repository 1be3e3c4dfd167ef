//! Tab-delimited record reading.
//!
//! Data files carry no header row; fields are mapped positionally onto the
//! template's [`HeaderDefinition`]. Fields beyond the header are kept under
//! [`REMAINDER_KEY`] instead of being dropped, and missing trailing fields
//! read as empty.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use feedcheck_model::HeaderDefinition;

use crate::error::{IngestError, Result};

/// Reserved key holding fields beyond the header count.
pub const REMAINDER_KEY: &str = "__REMAINDER__";

/// A value looked up on a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValue<'a> {
    Field(&'a str),
    Remainder(&'a [String]),
}

/// One line of a data file mapped onto the header.
#[derive(Debug, Clone)]
pub struct Record {
    line: u64,
    header: HeaderDefinition,
    values: Vec<String>,
    remainder: Vec<String>,
}

impl Record {
    fn from_fields(header: &HeaderDefinition, line: u64, fields: &StringRecord) -> Self {
        let width = header.len();
        let mut values: Vec<String> = fields.iter().take(width).map(str::to_string).collect();
        values.resize(width, String::new());
        let remainder = fields.iter().skip(width).map(str::to_string).collect();
        Self {
            line,
            header: header.clone(),
            values,
            remainder,
        }
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Value of `column`, or `None` when the header has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.header
            .position(column)
            .map(|idx| self.values[idx].as_str())
    }

    /// Value of `column`, empty when the header has no such column.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Whether `column` holds a non-empty value.
    pub fn is_filled(&self, column: &str) -> bool {
        !self.value(column).is_empty()
    }

    /// Lookup by key; [`REMAINDER_KEY`] yields the overflow fields, if any.
    pub fn lookup(&self, key: &str) -> Option<RecordValue<'_>> {
        if key == REMAINDER_KEY {
            return (!self.remainder.is_empty())
                .then_some(RecordValue::Remainder(self.remainder.as_slice()));
        }
        self.get(key).map(RecordValue::Field)
    }

    /// Fields beyond the header count.
    pub fn remainder(&self) -> &[String] {
        &self.remainder
    }

    /// `(column, value)` pairs for `columns`, in the given order.
    pub fn values_of(&self, columns: &[String]) -> Vec<(String, String)> {
        columns
            .iter()
            .map(|column| (column.clone(), self.value(column).to_string()))
            .collect()
    }
}

/// Lazy sequence of [`Record`]s from one data file.
///
/// Re-open the file to read it again.
pub struct RowSource {
    path: PathBuf,
    header: HeaderDefinition,
    records: StringRecordsIntoIter<File>,
}

impl RowSource {
    /// Open `path` for reading with `header` as field names.
    pub fn open(path: &Path, header: &HeaderDefinition) -> Result<Self> {
        let reader = tab_reader(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            header: header.clone(),
            records: reader.into_records(),
        })
    }
}

impl Iterator for RowSource {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.records.next()?;
        Some(
            next.map(|fields| {
                let line = line_of(&fields);
                Record::from_fields(&self.header, line, &fields)
            })
            .map_err(|err| record_error(&self.path, &err)),
        )
    }
}

/// Raw rows of a data file without header mapping: `(line, fields)`.
pub fn read_rows(path: &Path) -> Result<Vec<(u64, Vec<String>)>> {
    let reader = tab_reader(path)?;
    let mut rows = Vec::new();
    for result in reader.into_records() {
        let fields = result.map_err(|err| record_error(path, &err))?;
        let line = line_of(&fields);
        rows.push((line, fields.iter().map(str::to_string).collect()));
    }
    Ok(rows)
}

fn tab_reader(path: &Path) -> Result<csv::Reader<File>> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::FileOpen {
            path: path.to_path_buf(),
            source,
        })
}

fn line_of(fields: &StringRecord) -> u64 {
    fields.position().map_or(0, csv::Position::line)
}

fn record_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::Record {
        path: path.to_path_buf(),
        line: err.position().map(csv::Position::line),
        message: err.to_string(),
    }
}
