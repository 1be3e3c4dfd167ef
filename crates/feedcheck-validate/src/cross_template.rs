//! Cross-template validation.
//!
//! A [`TemplatePair`] correlates parent and child files by name: the child
//! file is the parent's file name with the parent template token replaced
//! by the child's. For each matched pair:
//!
//! - every parent record's leading key must occur in the child file,
//! - every distinct child leading key must occur in the parent file.
//!
//! Independently, each feed file's reference header must carry both
//! template names of the pair.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info_span, warn};

use feedcheck_ingest::{IngestError, file_name, list_feed_files, read_rows, template_token};
use feedcheck_model::{CheckKind, CheckResult, Issue, Outcome, PairReport, TemplatePair};
use feedcheck_standards::HeaderStore;

/// Number of leading fields that identify a record across a pair.
pub const LEADING_KEY_WIDTH: usize = 4;

/// A parent file and its child counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub parent: PathBuf,
    pub child: PathBuf,
}

impl FilePair {
    pub fn label(&self) -> String {
        format!("{} / {}", file_name(&self.parent), file_name(&self.child))
    }
}

/// Replace the first occurrence of `from` in `name` (ignoring ASCII case)
/// with `to`.
pub fn counterpart_name(name: &str, from: &str, to: &str) -> Option<String> {
    let idx = name
        .to_ascii_uppercase()
        .find(&from.to_ascii_uppercase())?;
    Some(format!("{}{}{}", &name[..idx], to, &name[idx + from.len()..]))
}

/// Match parent files to child files and report files without a
/// counterpart, in both directions.
pub fn match_files(
    pair: &TemplatePair,
    parents: &[PathBuf],
    children: &[PathBuf],
) -> (Vec<FilePair>, Vec<Issue>) {
    let mut matched = Vec::new();
    let mut unpaired = Vec::new();

    for parent in parents {
        match find_counterpart(parent, &pair.parent, &pair.child, children) {
            Ok(child) => matched.push(FilePair {
                parent: parent.clone(),
                child: child.clone(),
            }),
            Err(issue) => unpaired.push(issue),
        }
    }
    for child in children {
        if let Err(issue) = find_counterpart(child, &pair.child, &pair.parent, parents) {
            unpaired.push(issue);
        }
    }

    (matched, unpaired)
}

fn find_counterpart<'a>(
    path: &Path,
    from: &str,
    to: &str,
    candidates: &'a [PathBuf],
) -> Result<&'a PathBuf, Issue> {
    let name = file_name(path);
    let expected = counterpart_name(&name, from, to).unwrap_or_default();
    candidates
        .iter()
        .find(|candidate| !expected.is_empty() && file_name(candidate).eq_ignore_ascii_case(&expected))
        .ok_or(Issue::UnpairedFile {
            file_name: name,
            expected,
        })
}

/// Leading key of a raw row.
pub fn leading_key(fields: &[String]) -> Vec<String> {
    fields.iter().take(LEADING_KEY_WIDTH).cloned().collect()
}

/// Every parent record (each occurrence) has its leading key in the child.
pub fn check_parent_has_child(files: &FilePair) -> Outcome {
    let (parent_rows, child_rows) = match (read_rows(&files.parent), read_rows(&files.child)) {
        (Ok(parent), Ok(child)) => (parent, child),
        (Err(err), _) | (_, Err(err)) => return unreadable(&err),
    };
    let child_keys: HashSet<Vec<String>> = child_rows
        .iter()
        .map(|(_, fields)| leading_key(fields))
        .collect();
    let child_file = file_name(&files.child);

    let issues = parent_rows
        .iter()
        .filter_map(|(line, fields)| {
            let key = leading_key(fields);
            (!child_keys.contains(&key)).then(|| Issue::OrphanedParentRecord {
                line: *line,
                key,
                child_file: child_file.clone(),
            })
        })
        .collect();
    Outcome::from_issues(issues)
}

/// The distinct child leading keys are a subset of the parent's.
pub fn check_child_has_parent(files: &FilePair) -> Outcome {
    let (parent_rows, child_rows) = match (read_rows(&files.parent), read_rows(&files.child)) {
        (Ok(parent), Ok(child)) => (parent, child),
        (Err(err), _) | (_, Err(err)) => return unreadable(&err),
    };
    let parent_keys: HashSet<Vec<String>> = parent_rows
        .iter()
        .map(|(_, fields)| leading_key(fields))
        .collect();
    let child_keys: BTreeSet<Vec<String>> = child_rows
        .iter()
        .map(|(_, fields)| leading_key(fields))
        .collect();
    let parent_file = file_name(&files.parent);

    let issues = child_keys
        .into_iter()
        .filter(|key| !parent_keys.contains(key))
        .map(|key| Issue::OrphanedChildRecord {
            key,
            parent_file: parent_file.clone(),
        })
        .collect();
    Outcome::from_issues(issues)
}

/// Every feed file's reference header names both templates of `pair`.
pub fn check_template_in_headers(
    pair: &TemplatePair,
    files: &[PathBuf],
    headers: &HeaderStore,
) -> Outcome {
    if files.is_empty() {
        return Outcome::skipped("no feed files found");
    }

    let mut issues = Vec::new();
    for path in files {
        let name = file_name(path);
        let Some(template) = template_token(path) else {
            issues.push(Issue::MalformedFilename { file_name: name });
            continue;
        };
        let header = match headers.load(&template) {
            Ok(header) => header,
            Err(err) => {
                issues.push(Issue::MissingReferenceDefinition {
                    template,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        let missing: Vec<String> = [&pair.parent, &pair.child]
            .into_iter()
            .filter(|token| !header.contains(token))
            .cloned()
            .collect();
        if !missing.is_empty() {
            issues.push(Issue::TemplateNotInHeader {
                file_name: name,
                template,
                missing,
            });
        }
    }
    Outcome::from_issues(issues)
}

/// Run every cross-template check for `pair` over the files in `source_dir`.
///
/// # Errors
///
/// Fails only when the source directory cannot be listed.
pub fn validate_pair(
    pair: &TemplatePair,
    source_dir: &Path,
    headers: &HeaderStore,
) -> Result<PairReport, IngestError> {
    let span = info_span!("validate_pair", pair = %pair.label());
    let _guard = span.enter();

    let parents = list_feed_files(source_dir, Some(&pair.parent))?;
    let children = list_feed_files(source_dir, Some(&pair.child))?;
    let all_files = list_feed_files(source_dir, None)?;

    let mut report = PairReport::new(&pair.parent, &pair.child);

    let (matched, unpaired) = match_files(pair, &parents, &children);
    for issue in &unpaired {
        warn!("{}", issue.message());
    }
    let pairing = if parents.is_empty() && children.is_empty() {
        Outcome::skipped(format!("no {} or {} files found", pair.parent, pair.child))
    } else {
        Outcome::from_issues(unpaired)
    };
    report.checks.push(CheckResult::new(CheckKind::FilePairs, pairing));

    if matched.is_empty() {
        let reason = format!("no {} file pairs found", pair.label());
        report.checks.push(CheckResult::new(
            CheckKind::ParentHasChild,
            Outcome::skipped(reason.clone()),
        ));
        report.checks.push(CheckResult::new(
            CheckKind::ChildHasParent,
            Outcome::skipped(reason),
        ));
    } else {
        for files in &matched {
            debug!(pair = %files.label(), "checking file pair");
            report.checks.push(
                CheckResult::new(CheckKind::ParentHasChild, check_parent_has_child(files))
                    .with_subject(files.label()),
            );
            report.checks.push(
                CheckResult::new(CheckKind::ChildHasParent, check_child_has_parent(files))
                    .with_subject(files.label()),
            );
        }
    }

    report.checks.push(CheckResult::new(
        CheckKind::TemplateInHeaders,
        check_template_in_headers(pair, &all_files, headers),
    ));

    Ok(report)
}

fn unreadable(err: &IngestError) -> Outcome {
    Outcome::from_issues(vec![Issue::UnreadableRecord {
        line: err.line(),
        reason: err.to_string(),
    }])
}
