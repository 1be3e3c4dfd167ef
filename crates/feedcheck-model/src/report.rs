//! Check outcomes and the reports that collect them.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// The individual checks run by the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    // Per-file checks, in execution order.
    FileFormat,
    PrimaryKey,
    RequiredColumns,
    NumberFormat,
    DateFormat,
    BooleanFormat,
    UnitType,
    // Pair checks.
    FilePairs,
    ParentHasChild,
    ChildHasParent,
    TemplateInHeaders,
}

impl CheckKind {
    /// Checks gated behind [`CheckKind::FileFormat`].
    pub const fn content_checks() -> &'static [Self] {
        &[
            Self::PrimaryKey,
            Self::RequiredColumns,
            Self::NumberFormat,
            Self::DateFormat,
            Self::BooleanFormat,
            Self::UnitType,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FileFormat => "File format",
            Self::PrimaryKey => "Primary key",
            Self::RequiredColumns => "Required columns",
            Self::NumberFormat => "Number format",
            Self::DateFormat => "Date format",
            Self::BooleanFormat => "Boolean format",
            Self::UnitType => "Unit type",
            Self::FilePairs => "File pairs",
            Self::ParentHasChild => "Parent has child",
            Self::ChildHasParent => "Child has parent",
            Self::TemplateInHeaders => "Template in headers",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of running one check.
///
/// `Skipped` means the template declares nothing for the check to look at;
/// `NotApplicable` means a gating check failed first. Neither counts as a
/// pass or a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Outcome {
    Pass,
    Fail { issues: Vec<Issue> },
    Skipped { reason: String },
    NotApplicable { reason: String },
}

impl Outcome {
    /// `Pass` when there are no issues, `Fail` otherwise.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        if issues.is_empty() {
            Self::Pass
        } else {
            Self::Fail { issues }
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn not_applicable(reason: impl Into<String>) -> Self {
        Self::NotApplicable {
            reason: reason.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Fail { issues } => issues,
            _ => &[],
        }
    }

    /// Short status label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail { .. } => "FAIL",
            Self::Skipped { .. } => "SKIP",
            Self::NotApplicable { .. } => "N/A",
        }
    }
}

/// One check and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: CheckKind,
    /// File or file pair the check ran against, when narrower than the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub outcome: Outcome,
}

impl CheckResult {
    pub fn new(check: CheckKind, outcome: Outcome) -> Self {
        Self {
            check,
            subject: None,
            outcome,
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Validation results for one data file under one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub template: String,
    pub path: PathBuf,
    pub checks: Vec<CheckResult>,
}

impl FileReport {
    pub fn new(template: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            path: path.into(),
            checks: Vec::new(),
        }
    }

    pub fn push(&mut self, check: CheckKind, outcome: Outcome) {
        self.checks.push(CheckResult::new(check, outcome));
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn outcome(&self, check: CheckKind) -> Option<&Outcome> {
        self.checks
            .iter()
            .find(|result| result.check == check)
            .map(|result| &result.outcome)
    }

    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|result| result.outcome.is_fail())
    }
}

/// Results of the cross-template checks for one template pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReport {
    pub parent: String,
    pub child: String,
    pub checks: Vec<CheckResult>,
}

impl PairReport {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            checks: Vec::new(),
        }
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.parent, self.child)
    }

    /// All results recorded for `check`, one per file pair where applicable.
    pub fn results(&self, check: CheckKind) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(move |result| result.check == check)
    }

    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|result| result.outcome.is_fail())
    }
}

/// Status tallies across a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub not_applicable: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail { .. } => self.failed += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::NotApplicable { .. } => self.not_applicable += 1,
        }
    }
}

/// Everything produced by one run of the suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub files: Vec<FileReport>,
    pub pairs: Vec<PairReport>,
}

impl SuiteReport {
    pub fn has_failures(&self) -> bool {
        self.files.iter().any(FileReport::has_failures)
            || self.pairs.iter().any(PairReport::has_failures)
    }

    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        let results = self
            .files
            .iter()
            .flat_map(|file| file.checks.iter())
            .chain(self.pairs.iter().flat_map(|pair| pair.checks.iter()));
        for result in results {
            counts.record(&result.outcome);
        }
        counts
    }
}
