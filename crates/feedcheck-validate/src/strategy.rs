//! Primary key and required column strategies.
//!
//! Most templates use [`GenericStrategy`]. Templates whose required
//! columns are alternatives (any one suffices, with dependencies between
//! them) use [`AlternativeRequiredStrategy`], which also folds those rules
//! into the primary key check.

use feedcheck_model::{Dependency, Issue, RequiredPolicy, TemplateRules};

use crate::checks::{Records, primary_key, required};

/// Pluggable primary key and required column behaviour.
pub trait RuleStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Columns read by [`RuleStrategy::check_primary_key`].
    fn primary_key_columns(&self, rules: &TemplateRules) -> Vec<String>;

    fn check_primary_key(&self, rules: &TemplateRules, records: Records<'_>) -> Vec<Issue>;

    /// Columns read by [`RuleStrategy::check_required`]. Empty means the
    /// template declares nothing to check.
    fn required_columns(&self, rules: &TemplateRules) -> Vec<String>;

    fn check_required(&self, rules: &TemplateRules, records: Records<'_>) -> Vec<Issue>;
}

/// Key columns filled and unique; all required columns filled.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

impl RuleStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn primary_key_columns(&self, rules: &TemplateRules) -> Vec<String> {
        dedup(rules.key_columns())
    }

    fn check_primary_key(&self, rules: &TemplateRules, records: Records<'_>) -> Vec<Issue> {
        primary_key::check_scoped(&rules.primary_key, &rules.key_columns(), records, |_, _| {})
    }

    fn required_columns(&self, rules: &TemplateRules) -> Vec<String> {
        rules.required.clone()
    }

    fn check_required(&self, rules: &TemplateRules, records: Records<'_>) -> Vec<Issue> {
        required::check(&rules.required, records)
    }
}

/// Any one of `columns` satisfies the required rule; each dependency
/// requires its companion column once its trigger is filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternativeRequiredStrategy {
    columns: Vec<String>,
    dependencies: Vec<Dependency>,
}

impl AlternativeRequiredStrategy {
    pub fn new(columns: Vec<String>, dependencies: Vec<Dependency>) -> Self {
        Self {
            columns,
            dependencies,
        }
    }

    fn rule_columns(&self) -> Vec<String> {
        let mut columns = self.columns.clone();
        for dependency in &self.dependencies {
            columns.push(dependency.trigger.clone());
            columns.push(dependency.requires.clone());
        }
        dedup(columns)
    }
}

impl RuleStrategy for AlternativeRequiredStrategy {
    fn name(&self) -> &'static str {
        "alternative-required"
    }

    fn primary_key_columns(&self, rules: &TemplateRules) -> Vec<String> {
        let mut columns = rules.key_columns();
        columns.extend(self.rule_columns());
        dedup(columns)
    }

    fn check_primary_key(&self, rules: &TemplateRules, records: Records<'_>) -> Vec<Issue> {
        primary_key::check_scoped(
            &rules.primary_key,
            &rules.key_columns(),
            records,
            |record, issues| {
                required::any_of_issues(record, &self.columns, &self.dependencies, issues);
            },
        )
    }

    fn required_columns(&self, _rules: &TemplateRules) -> Vec<String> {
        self.rule_columns()
    }

    fn check_required(&self, _rules: &TemplateRules, records: Records<'_>) -> Vec<Issue> {
        required::check_any_of(&self.columns, &self.dependencies, records)
    }
}

/// The strategy matching a template's required policy.
pub fn strategy_for(rules: &TemplateRules) -> Box<dyn RuleStrategy> {
    match &rules.required_policy {
        RequiredPolicy::All => Box::new(GenericStrategy),
        RequiredPolicy::AnyOf {
            columns,
            dependencies,
        } => Box::new(AlternativeRequiredStrategy::new(
            columns.clone(),
            dependencies.clone(),
        )),
    }
}

fn dedup(columns: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        if !unique.contains(&column) {
            unique.push(column);
        }
    }
    unique
}
