//! Data model for commissions feed validation.

pub mod header;
pub mod issue;
pub mod report;
pub mod template;

pub use header::HeaderDefinition;
pub use issue::{ColumnValue, Issue, format_key, format_values};
pub use report::{
    CheckKind, CheckResult, FileReport, Outcome, OutcomeCounts, PairReport, SuiteReport,
};
pub use template::{
    Dependency, KeyScope, RequiredPolicy, TemplatePair, TemplateRules, UNIT_TYPE_PREFIX,
    unit_type_column,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_columns_follow_scope() {
        let rules = TemplateRules::new("TXTA")
            .with_primary_key(&["ORDERID", "LINENUMBER"])
            .with_required(&["PAYEEID"]);
        assert_eq!(rules.key_columns(), vec!["ORDERID", "LINENUMBER"]);

        let combined = rules.with_key_scope(KeyScope::PrimaryKeyAndRequired);
        assert_eq!(combined.key_columns(), vec!["ORDERID", "LINENUMBER", "PAYEEID"]);
    }

    #[test]
    fn unit_type_pairs_use_prefix() {
        let rules = TemplateRules::new("TXSTA").with_numbers(&["VALUE"]);
        assert_eq!(
            rules.unit_type_pairs(),
            vec![("VALUE".to_string(), "UNITTYPEFORVALUE".to_string())]
        );
    }

    #[test]
    fn report_serializes() {
        let mut report = FileReport::new("OGPO", "CALD_OGPO_DEV_20070805.txt");
        report.push(CheckKind::BooleanFormat, Outcome::skipped("no boolean columns"));
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: FileReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
        assert!(json.contains("\"status\":\"skipped\""));
    }
}
