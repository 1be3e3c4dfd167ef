//! Per-file validation engine.

use std::path::Path;

use tracing::{debug, info_span, warn};

use feedcheck_ingest::{RowSource, file_name};
use feedcheck_model::{CheckKind, FileReport, HeaderDefinition, Issue, Outcome, TemplateRules};
use feedcheck_standards::HeaderStore;

use crate::checks::{self, Records, format::ValueFormat};
use crate::strategy::{RuleStrategy, strategy_for};

/// Runs every per-file check for one template.
pub struct Validator<'a> {
    rules: &'a TemplateRules,
    headers: &'a HeaderStore,
    strategy: Box<dyn RuleStrategy>,
}

impl<'a> Validator<'a> {
    pub fn new(rules: &'a TemplateRules, headers: &'a HeaderStore) -> Self {
        Self {
            rules,
            headers,
            strategy: strategy_for(rules),
        }
    }

    /// Replace the primary key / required column strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn RuleStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate one data file. Never fails: problems become outcomes.
    pub fn validate_file(&self, path: &Path) -> FileReport {
        let name = file_name(path);
        let span = info_span!("file", template = %self.rules.name, file = %name);
        let _guard = span.enter();

        let mut report = FileReport::new(&self.rules.name, path);

        let header = match self.headers.load(&self.rules.name) {
            Ok(header) => header,
            Err(err) => {
                warn!(error = %err, "reference header unavailable");
                let issue = Issue::MissingReferenceDefinition {
                    template: self.rules.name.clone(),
                    reason: err.to_string(),
                };
                report.push(CheckKind::FileFormat, Outcome::from_issues(vec![issue.clone()]));
                for &check in CheckKind::content_checks() {
                    report.push(check, Outcome::from_issues(vec![issue.clone()]));
                }
                return report;
            }
        };

        let file_outcome = Outcome::from_issues(checks::file::check(path, &header));
        let gated = file_outcome.is_fail();
        report.push(CheckKind::FileFormat, file_outcome);

        for &check in CheckKind::content_checks() {
            let outcome = if gated {
                Outcome::not_applicable("file format check failed")
            } else {
                self.run_content_check(check, path, &header)
            };
            debug!(check = %check, outcome = outcome.label(), "check finished");
            report.push(check, outcome);
        }

        report
    }

    fn run_content_check(&self, check: CheckKind, path: &Path, header: &HeaderDefinition) -> Outcome {
        let rules = self.rules;
        let columns = match check {
            CheckKind::PrimaryKey if rules.primary_key.is_empty() => Vec::new(),
            CheckKind::PrimaryKey => self.strategy.primary_key_columns(rules),
            CheckKind::RequiredColumns => self.strategy.required_columns(rules),
            CheckKind::NumberFormat => rules.numbers.clone(),
            CheckKind::DateFormat => rules.dates.clone(),
            CheckKind::BooleanFormat => rules.booleans.clone(),
            CheckKind::UnitType => rules
                .unit_type_pairs()
                .into_iter()
                .flat_map(|(number, unit_type)| [number, unit_type])
                .collect(),
            _ => return Outcome::not_applicable("not a per-file check"),
        };

        if columns.is_empty() {
            return Outcome::skipped(format!("{} declares no {}", rules.name, subject(check)));
        }

        let unknown = checks::unknown_columns(header, &columns);
        if !unknown.is_empty() {
            return Outcome::from_issues(unknown);
        }

        let mut rows = match RowSource::open(path, header) {
            Ok(rows) => rows,
            Err(err) => {
                return Outcome::from_issues(vec![Issue::UnreadableRecord {
                    line: err.line(),
                    reason: err.to_string(),
                }]);
            }
        };
        let records: Records<'_> = &mut rows;

        let issues = match check {
            CheckKind::PrimaryKey => self.strategy.check_primary_key(rules, records),
            CheckKind::RequiredColumns => self.strategy.check_required(rules, records),
            CheckKind::NumberFormat => {
                checks::format::check(ValueFormat::Number, &rules.numbers, records)
            }
            CheckKind::DateFormat => checks::format::check(ValueFormat::Date, &rules.dates, records),
            CheckKind::BooleanFormat => {
                checks::format::check(ValueFormat::Boolean, &rules.booleans, records)
            }
            CheckKind::UnitType => checks::unit_type::check(&rules.unit_type_pairs(), records),
            _ => Vec::new(),
        };
        Outcome::from_issues(issues)
    }
}

fn subject(check: CheckKind) -> &'static str {
    match check {
        CheckKind::PrimaryKey => "primary key columns",
        CheckKind::RequiredColumns => "required columns",
        CheckKind::NumberFormat | CheckKind::UnitType => "number columns",
        CheckKind::DateFormat => "date columns",
        CheckKind::BooleanFormat => "boolean columns",
        _ => "columns",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedcheck_standards::registry::{position, transaction_assignment, transaction_status};
    use tempfile::TempDir;

    const TXSTA_HEADER: &str = "ORDERID\tLINENUMBER\tSUBLINENUMBER\tEVENTTYPEID\tVALUE\tUNITTYPEFORVALUE\tCOMPENSATIONDATE\n";

    fn workspace(header: Option<(&str, &str)>) -> (TempDir, HeaderStore) {
        let dir = TempDir::new().unwrap();
        let headers_dir = dir.path().join("headers");
        std::fs::create_dir(&headers_dir).unwrap();
        if let Some((template, content)) = header {
            std::fs::write(headers_dir.join(format!("{template}.txt")), content).unwrap();
        }
        let store = HeaderStore::new(headers_dir);
        (dir, store)
    }

    fn data_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn rules() -> TemplateRules {
        TemplateRules::new("TXSTA")
            .with_primary_key(&["ORDERID", "LINENUMBER", "SUBLINENUMBER", "EVENTTYPEID"])
            .with_required(&["VALUE", "UNITTYPEFORVALUE", "COMPENSATIONDATE"])
            .with_numbers(&["VALUE"])
            .with_dates(&["COMPENSATIONDATE"])
    }

    #[test]
    fn clean_file_passes_and_booleans_are_skipped() {
        let (dir, store) = workspace(Some(("TXSTA", TXSTA_HEADER)));
        let path = data_file(
            &dir,
            "CALD_TXSTA_DEV_20070805.txt",
            "O\t1\t1\tE1\t10\tUSD\t08/05/2007\nO\t1\t1\tE2\t5.5\tUSD\t8/6/2007\n",
        );
        let rules = rules();
        let report = Validator::new(&rules, &store).validate_file(&path);

        assert!(!report.has_failures(), "{report:?}");
        assert!(report.outcome(CheckKind::PrimaryKey).unwrap().is_pass());
        assert!(report.outcome(CheckKind::UnitType).unwrap().is_pass());
        assert!(report.outcome(CheckKind::BooleanFormat).unwrap().is_skipped());
    }

    #[test]
    fn failed_file_format_gates_content_checks() {
        let (dir, store) = workspace(Some(("TXSTA", TXSTA_HEADER)));
        let path = data_file(&dir, "CALD_TXSTA_DEV_20070805.txt", "O,1,1,E1\n");
        let rules = rules();
        let report = Validator::new(&rules, &store).validate_file(&path);

        assert!(report.outcome(CheckKind::FileFormat).unwrap().is_fail());
        for &check in CheckKind::content_checks() {
            assert!(
                matches!(report.outcome(check), Some(Outcome::NotApplicable { .. })),
                "{check} should be gated"
            );
        }
    }

    #[test]
    fn missing_reference_header_fails_every_check() {
        let (dir, store) = workspace(None);
        let path = data_file(&dir, "CALD_TXSTA_DEV_20070805.txt", "O\t1\t1\tE1\n");
        let rules = rules();
        let report = Validator::new(&rules, &store).validate_file(&path);

        assert_eq!(report.checks.len(), 1 + CheckKind::content_checks().len());
        for result in &report.checks {
            assert!(matches!(
                result.outcome.issues(),
                [Issue::MissingReferenceDefinition { .. }]
            ));
        }
    }

    #[test]
    fn configured_column_missing_from_header_fails_its_check() {
        let (dir, store) = workspace(Some(("TXSTA", TXSTA_HEADER)));
        let path = data_file(&dir, "CALD_TXSTA_DEV_20070805.txt", "O\t1\t1\tE1\t\t\t\n");
        let rules = rules().with_booleans(&["ISACTIVE"]);
        let report = Validator::new(&rules, &store).validate_file(&path);

        assert_eq!(
            report.outcome(CheckKind::BooleanFormat).unwrap().issues(),
            [Issue::UnknownColumn {
                template: "TXSTA".to_string(),
                column: "ISACTIVE".to_string(),
            }]
        );
    }

    #[test]
    fn position_template_checks_dates() {
        let header = "POSITIONNAME\tEFFECTIVESTARTDATE\tEFFECTIVEENDDATE\tTITLENAME\n";
        let rules = position().with_dates(&["EFFECTIVESTARTDATE", "EFFECTIVEENDDATE"]);
        let (dir, store) = workspace(Some(("OGPO", header)));
        let path = data_file(
            &dir,
            "CALD_OGPO_DEV_20070805.txt",
            "P1\t01/01/2007\t02/30/2007\tManager\n",
        );
        let report = Validator::new(&rules, &store).validate_file(&path);
        let issues = report.outcome(CheckKind::DateFormat).unwrap().issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line(), Some(1));
    }

    #[test]
    fn assignment_template_uses_alternative_rules() {
        let header = "ORDERID\tLINENUMBER\tSUBLINENUMBER\tEVENTTYPEID\tPAYEEID\tPAYEETYPE\tPOSITIONNAME\tTITLENAME\n";
        let (dir, store) = workspace(Some(("TXTA", header)));
        let path = data_file(
            &dir,
            "CALD_TXTA_DEV_20070805.txt",
            "O\t1\t1\tE1\t\t\t\tManager\nO\t1\t1\tE1\tP1\t\t\t\n",
        );
        let rules = transaction_assignment();
        let report = Validator::new(&rules, &store).validate_file(&path);

        assert!(report.outcome(CheckKind::RequiredColumns).unwrap().is_fail());
        let required = report.outcome(CheckKind::RequiredColumns).unwrap().issues();
        assert!(matches!(
            required,
            [Issue::MissingDependentColumn { line: 2, .. }]
        ));
    }

    #[test]
    fn assignment_primary_key_folds_in_alternative_rules() {
        let header = "ORDERID\tLINENUMBER\tSUBLINENUMBER\tEVENTTYPEID\tPAYEEID\tPAYEETYPE\tPOSITIONNAME\tTITLENAME\n";
        let (dir, store) = workspace(Some(("TXTA", header)));
        let path = data_file(
            &dir,
            "CALD_TXTA_DEV_20070805.txt",
            "O\t1\t1\tE1\t\t\t\t\nO\t1\t1\tE1\tP1\t\t\t\nO\t1\t1\tE1\tP1\t\t\t\n",
        );
        let rules = transaction_assignment();
        let report = Validator::new(&rules, &store).validate_file(&path);

        let issues = report.outcome(CheckKind::PrimaryKey).unwrap().issues();
        assert!(matches!(
            issues,
            [
                Issue::MissingAnyOf { line: 1, .. },
                Issue::MissingDependentColumn { line: 2, .. },
                Issue::MissingDependentColumn { line: 3, .. },
                Issue::DuplicatePrimaryKey { line: 3, .. },
            ]
        ));
        let Issue::DuplicatePrimaryKey { key, .. } = &issues[3] else {
            unreachable!()
        };
        assert_eq!(key, &["O", "1", "1", "E1", "P1", "", "", ""]);
    }

    #[test]
    fn custom_strategy_is_used() {
        struct Lenient;
        impl RuleStrategy for Lenient {
            fn name(&self) -> &'static str {
                "lenient"
            }
            fn primary_key_columns(&self, rules: &TemplateRules) -> Vec<String> {
                rules.primary_key.clone()
            }
            fn check_primary_key(&self, _: &TemplateRules, _: Records<'_>) -> Vec<Issue> {
                Vec::new()
            }
            fn required_columns(&self, rules: &TemplateRules) -> Vec<String> {
                rules.required.clone()
            }
            fn check_required(&self, _: &TemplateRules, _: Records<'_>) -> Vec<Issue> {
                Vec::new()
            }
        }

        let (dir, store) = workspace(Some(("TXSTA", TXSTA_HEADER)));
        let path = data_file(
            &dir,
            "CALD_TXSTA_DEV_20070805.txt",
            "O\t1\t1\tE1\t\t\t\nO\t1\t1\tE1\t\t\t\n",
        );
        let rules = transaction_status();
        let report = Validator::new(&rules, &store)
            .with_strategy(Box::new(Lenient))
            .validate_file(&path);
        assert!(report.outcome(CheckKind::PrimaryKey).unwrap().is_pass());
        assert!(report.outcome(CheckKind::RequiredColumns).unwrap().is_pass());
    }
}
