//! Rendering of suite reports.

use feedcheck_cli::summary::{issue_table, render_json, results_table, templates_table};
use feedcheck_model::{
    CheckKind, CheckResult, FileReport, Issue, Outcome, PairReport, SuiteReport,
};
use feedcheck_standards::builtin_templates;

fn sample_report() -> SuiteReport {
    let mut file = FileReport::new("TXSTA", "source/CALD_TXSTA_DEV_20070805.txt");
    file.push(CheckKind::FileFormat, Outcome::Pass);
    file.push(
        CheckKind::PrimaryKey,
        Outcome::from_issues(vec![Issue::DuplicatePrimaryKey {
            line: 2,
            key: vec!["A".to_string(), "1".to_string()],
        }]),
    );
    file.push(
        CheckKind::BooleanFormat,
        Outcome::skipped("TXSTA declares no boolean columns"),
    );

    let mut pair = PairReport::new("TXSTA", "TXTA");
    pair.checks.push(CheckResult::new(
        CheckKind::ParentHasChild,
        Outcome::skipped("no TXSTA/TXTA file pairs found"),
    ));

    SuiteReport {
        files: vec![file],
        pairs: vec![pair],
    }
}

#[test]
fn results_table_has_a_row_per_check() {
    let mut table = results_table(&sample_report());
    table.force_no_tty();
    let rendered = table.to_string();

    assert_eq!(table.row_iter().count(), 4);
    assert!(rendered.contains("FAIL"));
    assert!(rendered.contains("SKIP"));
    assert!(rendered.contains("CALD_TXSTA_DEV_20070805.txt"));
}

#[test]
fn issue_table_lists_issues_with_lines() {
    let mut table = issue_table(&sample_report()).unwrap();
    table.force_no_tty();
    let rendered = table.to_string();

    assert_eq!(table.row_iter().count(), 1);
    assert!(rendered.contains("MissingOrDuplicatePrimaryKey"));
}

#[test]
fn clean_report_has_no_issue_table() {
    assert!(issue_table(&SuiteReport::default()).is_none());
}

#[test]
fn json_report_carries_statuses() {
    let json = render_json(&sample_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    insta::assert_json_snapshot!(value["files"][0]["checks"][1], @r#"
    {
      "check": "primary_key",
      "outcome": {
        "issues": [
          {
            "key": [
              "A",
              "1"
            ],
            "kind": "DuplicatePrimaryKey",
            "line": 2
          }
        ],
        "status": "fail"
      }
    }
    "#);
}

#[test]
fn templates_table_lists_builtins() {
    let mut table = templates_table(&builtin_templates());
    table.force_no_tty();
    let rendered = table.to_string();

    assert_eq!(table.row_iter().count(), 3);
    assert!(rendered.contains("alternative-required"));
}
