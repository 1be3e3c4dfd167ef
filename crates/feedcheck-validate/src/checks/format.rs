//! Number, date and boolean format checks.
//!
//! Empty values are always accepted; a record with any invalid value in
//! the checked columns yields one issue listing only the invalid values.

use feedcheck_model::{ColumnValue, Issue};

use super::{Records, scan};
use crate::patterns::{is_boolean, is_date, is_number};

/// Which value format a column list is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Number,
    Date,
    Boolean,
}

impl ValueFormat {
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Number => is_number(value),
            Self::Date => is_date(value),
            Self::Boolean => is_boolean(value),
        }
    }

    fn issue(self, line: u64, values: Vec<ColumnValue>) -> Issue {
        match self {
            Self::Number => Issue::InvalidNumberFormat { line, values },
            Self::Date => Issue::InvalidDateFormat { line, values },
            Self::Boolean => Issue::InvalidBooleanFormat { line, values },
        }
    }
}

pub fn check(format: ValueFormat, columns: &[String], records: Records<'_>) -> Vec<Issue> {
    scan(records, |record, issues| {
        let invalid: Vec<ColumnValue> = columns
            .iter()
            .filter_map(|column| {
                let value = record.value(column);
                (!value.is_empty() && !format.accepts(value))
                    .then(|| (column.clone(), value.to_string()))
            })
            .collect();
        if !invalid.is_empty() {
            issues.push(format.issue(record.line(), invalid));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::{feed_file, header, rows};

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn number_format_reports_only_invalid_values() {
        let (_dir, path) = feed_file("12345.67\t1,234\n\t-5\n");
        let header = header(&["VALUE", "UNITVALUE"]);
        let issues = check(
            ValueFormat::Number,
            &columns(&["VALUE", "UNITVALUE"]),
            &mut rows(&path, &header),
        );
        assert_eq!(
            issues,
            vec![Issue::InvalidNumberFormat {
                line: 1,
                values: vec![("UNITVALUE".to_string(), "1,234".to_string())],
            }]
        );
    }

    #[test]
    fn date_format_rejects_impossible_dates() {
        let (_dir, path) = feed_file("08/05/2007\t\n13/40/2007\t2007-08-05\n");
        let header = header(&["COMPENSATIONDATE", "ACCOUNTINGDATE"]);
        let issues = check(
            ValueFormat::Date,
            &columns(&["COMPENSATIONDATE", "ACCOUNTINGDATE"]),
            &mut rows(&path, &header),
        );
        assert_eq!(issues.len(), 1);
        insta::assert_snapshot!(
            issues[0].to_string(),
            @"line 2: Date value must be in format of MM/DD/YYYY {COMPENSATIONDATE: '13/40/2007', ACCOUNTINGDATE: '2007-08-05'}"
        );
    }

    #[test]
    fn boolean_format() {
        let (_dir, path) = feed_file("0\t1\t\nx\ttrue\t1\n");
        let header = header(&["B1", "B2", "B3"]);
        let issues = check(
            ValueFormat::Boolean,
            &columns(&["B1", "B2", "B3"]),
            &mut rows(&path, &header),
        );
        assert_eq!(
            issues,
            vec![Issue::InvalidBooleanFormat {
                line: 2,
                values: vec![
                    ("B1".to_string(), "x".to_string()),
                    ("B2".to_string(), "true".to_string()),
                ],
            }]
        );
    }
}
