//! Built-in template rules.
//!
//! These cover the transaction status (`TXSTA`), transaction assignment
//! (`TXTA`) and position (`OGPO`) templates. A configuration file may add
//! templates or replace these by name.

use feedcheck_model::{Dependency, KeyScope, RequiredPolicy, TemplatePair, TemplateRules};

pub const TXSTA: &str = "TXSTA";
pub const TXTA: &str = "TXTA";
pub const OGPO: &str = "OGPO";

const GENERIC_NUMBERS: &[&str] = &[
    "GENERICNUMBER1",
    "GENERICNUMBER2",
    "GENERICNUMBER3",
    "GENERICNUMBER4",
    "GENERICNUMBER5",
    "GENERICNUMBER6",
];

const GENERIC_DATES: &[&str] = &[
    "GENERICDATE1",
    "GENERICDATE2",
    "GENERICDATE3",
    "GENERICDATE4",
    "GENERICDATE5",
    "GENERICDATE6",
];

const GENERIC_BOOLEANS: &[&str] = &[
    "GENERICBOOLEAN1",
    "GENERICBOOLEAN2",
    "GENERICBOOLEAN3",
    "GENERICBOOLEAN4",
    "GENERICBOOLEAN5",
    "GENERICBOOLEAN6",
];

const ORDER_KEY: &[&str] = &["ORDERID", "LINENUMBER", "SUBLINENUMBER", "EVENTTYPEID"];

fn concat(head: &[&'static str], tail: &[&'static str]) -> Vec<&'static str> {
    head.iter().chain(tail.iter()).copied().collect()
}

/// Transaction status rules.
pub fn transaction_status() -> TemplateRules {
    TemplateRules::new(TXSTA)
        .with_primary_key(ORDER_KEY)
        .with_required(&["VALUE", "UNITTYPEFORVALUE", "COMPENSATIONDATE"])
        .with_numbers(&concat(&["VALUE", "UNITVALUE"], GENERIC_NUMBERS))
        .with_dates(&concat(
            &["ACCOUNTINGDATE", "COMPENSATIONDATE"],
            GENERIC_DATES,
        ))
        .with_booleans(GENERIC_BOOLEANS)
}

/// Transaction assignment rules.
///
/// A payee, position or title identifies the assignment; a payee needs a
/// payee type. Duplicates are detected over the order key plus the
/// assignment columns.
pub fn transaction_assignment() -> TemplateRules {
    TemplateRules::new(TXTA)
        .with_primary_key(ORDER_KEY)
        .with_required(&["PAYEEID", "PAYEETYPE", "POSITIONNAME", "TITLENAME"])
        .with_numbers(GENERIC_NUMBERS)
        .with_dates(GENERIC_DATES)
        .with_booleans(GENERIC_BOOLEANS)
        .with_required_policy(RequiredPolicy::AnyOf {
            columns: vec![
                "PAYEEID".to_string(),
                "POSITIONNAME".to_string(),
                "TITLENAME".to_string(),
            ],
            dependencies: vec![Dependency::new("PAYEEID", "PAYEETYPE")],
        })
        .with_key_scope(KeyScope::PrimaryKeyAndRequired)
}

/// Position rules.
pub fn position() -> TemplateRules {
    TemplateRules::new(OGPO)
        .with_primary_key(&["POSITIONNAME"])
        .with_required(&["EFFECTIVESTARTDATE", "TITLENAME"])
        .with_numbers(&concat(&["TARGETCOMPENSATION"], GENERIC_NUMBERS))
        .with_dates(&[
            "EFFECTIVESTARTDATE",
            "EFFECTIVEENDDATE",
            "GENERICDATE1",
            "GENERICDATE2",
            "GENERICDATE3",
            "GENERICDATE4",
            "GENERICDATE5",
            "GENERICDATE6",
            "CREDITSTARTDATE",
            "CREDITENDDATE",
            "PROCESSINGSTARTDATE",
            "PROCESSINGENDDATE",
        ])
        .with_booleans(GENERIC_BOOLEANS)
}

pub fn builtin_templates() -> Vec<TemplateRules> {
    vec![transaction_status(), transaction_assignment(), position()]
}

pub fn builtin_pairs() -> Vec<TemplatePair> {
    vec![TemplatePair::new(TXSTA, TXTA)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let templates = builtin_templates();
        let mut names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), templates.len());
    }

    #[test]
    fn assignment_uses_alternative_required_policy() {
        let rules = transaction_assignment();
        assert!(matches!(rules.required_policy, RequiredPolicy::AnyOf { .. }));
        assert_eq!(rules.key_columns().len(), 8);
    }

    #[test]
    fn position_dates_include_processing_window() {
        let rules = position();
        assert_eq!(rules.dates.len(), 12);
        assert_eq!(rules.dates.last().map(String::as_str), Some("PROCESSINGENDDATE"));
    }
}
