//! End-to-end runs over a source directory.

use std::path::Path;

use feedcheck_model::{CheckKind, Issue, Outcome, TemplatePair, TemplateRules};
use feedcheck_standards::FeedConfig;
use feedcheck_standards::registry::{TXSTA, TXTA};
use feedcheck_validate::run_suite;
use tempfile::TempDir;

const STATUS_HEADER: &str =
    "ORDERID\tLINENUMBER\tSUBLINENUMBER\tEVENTTYPEID\tVALUE\tUNITTYPEFORVALUE\tCOMPENSATIONDATE\tTXSTA\tTXTA\n";
const ASSIGNMENT_HEADER: &str =
    "ORDERID\tLINENUMBER\tSUBLINENUMBER\tEVENTTYPEID\tPAYEEID\tPAYEETYPE\tPOSITIONNAME\tTITLENAME\tTXSTA\tTXTA\n";

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn config(root: &Path) -> FeedConfig {
    let status = TemplateRules::new(TXSTA)
        .with_primary_key(&["ORDERID", "LINENUMBER", "SUBLINENUMBER", "EVENTTYPEID"])
        .with_required(&["VALUE", "UNITTYPEFORVALUE", "COMPENSATIONDATE"])
        .with_numbers(&["VALUE"])
        .with_dates(&["COMPENSATIONDATE"]);
    let assignment = feedcheck_standards::registry::transaction_assignment();
    let assignment = TemplateRules {
        numbers: Vec::new(),
        dates: Vec::new(),
        booleans: Vec::new(),
        ..assignment
    };
    FeedConfig {
        source_dir: root.join("source"),
        headers_dir: root.join("headers"),
        templates: vec![status, assignment],
        pairs: vec![TemplatePair::new(TXSTA, TXTA)],
    }
}

fn workspace() -> TempDir {
    let root = TempDir::new().unwrap();
    let source = root.path().join("source");
    let headers = root.path().join("headers");
    std::fs::create_dir(&source).unwrap();
    std::fs::create_dir(&headers).unwrap();
    write(&headers, "TXSTA.txt", STATUS_HEADER);
    write(&headers, "TXTA.txt", ASSIGNMENT_HEADER);
    root
}

#[test]
fn clean_feed_passes() {
    let root = workspace();
    let source = root.path().join("source");
    write(
        &source,
        "CALD_TXSTA_DEV_20070805_134257_JULY07.txt",
        "O\t1\t1\tE1\t10\tUSD\t08/05/2007\nO\t1\t1\tE2\t-2.5\tUSD\t08/05/2007\n",
    );
    write(
        &source,
        "CALD_TXTA_DEV_20070805_134257_JULY07.txt",
        "O\t1\t1\tE1\tP1\tEmployee\t\t\nO\t1\t1\tE2\t\t\tPOS1\t\n",
    );

    let report = run_suite(&config(root.path())).unwrap();

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.pairs.len(), 1);
    assert!(!report.has_failures(), "{report:#?}");
}

#[test]
fn orphaned_records_fail_the_pair() {
    let root = workspace();
    let source = root.path().join("source");
    write(
        &source,
        "CALD_TXSTA_DEV_20070805.txt",
        "O\t1\t1\tE1\t10\tUSD\t08/05/2007\nO\t1\t1\tE2\t20\tUSD\t08/05/2007\n",
    );
    write(
        &source,
        "CALD_TXTA_DEV_20070805.txt",
        "O\t1\t1\tE1\tP1\tEmployee\t\t\n",
    );

    let report = run_suite(&config(root.path())).unwrap();
    let pair = &report.pairs[0];

    let parent_has_child: Vec<&Outcome> = pair
        .results(CheckKind::ParentHasChild)
        .map(|result| &result.outcome)
        .collect();
    assert_eq!(parent_has_child.len(), 1);
    assert!(matches!(
        parent_has_child[0].issues(),
        [Issue::OrphanedParentRecord { line: 2, .. }]
    ));
    assert!(
        pair.results(CheckKind::ChildHasParent)
            .all(|result| result.outcome.is_pass())
    );
    assert!(report.has_failures());
}

#[test]
fn unpaired_file_is_reported() {
    let root = workspace();
    let source = root.path().join("source");
    write(
        &source,
        "CALD_TXSTA_DEV_20070805.txt",
        "O\t1\t1\tE1\t10\tUSD\t08/05/2007\n",
    );

    let report = run_suite(&config(root.path())).unwrap();
    let pair = &report.pairs[0];

    let pairing = pair.results(CheckKind::FilePairs).next().unwrap();
    assert!(matches!(
        pairing.outcome.issues(),
        [Issue::UnpairedFile { expected, .. }] if expected == "CALD_TXTA_DEV_20070805.txt"
    ));
    assert!(
        pair.results(CheckKind::ParentHasChild)
            .all(|result| result.outcome.is_skipped())
    );
}

#[test]
fn empty_source_skips_pair_checks() {
    let root = workspace();
    let report = run_suite(&config(root.path())).unwrap();

    assert!(report.files.is_empty());
    assert!(!report.has_failures());
    let counts = report.counts();
    assert_eq!(counts.failed, 0);
    assert_eq!(counts.skipped, 4);
}

#[test]
fn repeated_runs_give_identical_reports() {
    let root = workspace();
    let source = root.path().join("source");
    write(
        &source,
        "CALD_TXSTA_DEV_20070805.txt",
        "O\t1\t1\tE1\t1,000\t\t2007-08-05\nO\t1\t1\tE1\t10\tUSD\t08/05/2007\n",
    );
    write(&source, "CALD_TXTA_DEV_20070805.txt", "O\t1\t1\tE3\t\t\t\t\n");

    let config = config(root.path());
    let first = run_suite(&config).unwrap();
    let second = run_suite(&config).unwrap();
    assert_eq!(first, second);
    assert!(first.has_failures());
}

#[test]
fn missing_source_directory_is_an_error() {
    let root = TempDir::new().unwrap();
    assert!(run_suite(&config(root.path())).is_err());
}
