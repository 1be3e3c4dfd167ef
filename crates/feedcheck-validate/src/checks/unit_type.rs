//! Number / unit type pairing check.

use feedcheck_model::Issue;

use super::{Records, scan};

/// For each `(number, unit type)` pair, filling either column requires
/// filling the other.
pub fn check(pairs: &[(String, String)], records: Records<'_>) -> Vec<Issue> {
    scan(records, |record, issues| {
        for (number, unit_type) in pairs {
            let number_value = record.value(number);
            let unit_value = record.value(unit_type);
            if number_value.is_empty() != unit_value.is_empty() {
                issues.push(Issue::MissingUnitType {
                    line: record.line(),
                    number: (number.clone(), number_value.to_string()),
                    unit_type: (unit_type.clone(), unit_value.to_string()),
                });
            }
        }
    })
}
