//! Whole-directory validation run.

use tracing::{info, info_span};

use feedcheck_ingest::{IngestError, list_feed_files};
use feedcheck_model::SuiteReport;
use feedcheck_standards::{FeedConfig, HeaderStore};

use crate::cross_template::validate_pair;
use crate::engine::Validator;

/// Validate every file of every configured template, then every pair.
///
/// # Errors
///
/// Fails only when the source directory cannot be listed; every other
/// problem is reported as an outcome.
pub fn run_suite(config: &FeedConfig) -> Result<SuiteReport, IngestError> {
    let headers = HeaderStore::new(&config.headers_dir);
    run_suite_with(config, &headers)
}

/// [`run_suite`] with a caller-provided header store.
pub fn run_suite_with(config: &FeedConfig, headers: &HeaderStore) -> Result<SuiteReport, IngestError> {
    let span = info_span!("run_suite", source = %config.source_dir.display());
    let _guard = span.enter();

    let mut report = SuiteReport::default();

    for rules in &config.templates {
        let files = list_feed_files(&config.source_dir, Some(&rules.name))?;
        info!(template = %rules.name, files = files.len(), "validating template");
        let validator = Validator::new(rules, headers);
        report
            .files
            .extend(files.iter().map(|path| validator.validate_file(path)));
    }

    for pair in &config.pairs {
        report
            .pairs
            .push(validate_pair(pair, &config.source_dir, headers)?);
    }

    let counts = report.counts();
    info!(
        passed = counts.passed,
        failed = counts.failed,
        skipped = counts.skipped,
        not_applicable = counts.not_applicable,
        "validation complete"
    );
    Ok(report)
}
