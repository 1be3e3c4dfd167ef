//! Report rendering: result and issue tables, JSON.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use feedcheck_model::{CheckResult, Issue, Outcome, SuiteReport, TemplateRules};

pub fn print_summary(report: &SuiteReport) {
    println!("{}", results_table(report));
    if let Some(table) = issue_table(report) {
        println!();
        println!("Issues:");
        println!("{table}");
    }
    let counts = report.counts();
    println!(
        "{} passed, {} failed, {} skipped, {} not applicable",
        counts.passed, counts.failed, counts.skipped, counts.not_applicable
    );
}

/// One row per check: subject, check, status, issue count, note.
pub fn results_table(report: &SuiteReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template"),
        header_cell("Subject"),
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Issues"),
        header_cell("Note"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);

    for (template, subject, result) in rows(report) {
        table.add_row(vec![
            template_cell(&template),
            Cell::new(subject),
            Cell::new(result.check.label()),
            status_cell(&result.outcome),
            count_cell(result.outcome.issues().len()),
            note_cell(&result.outcome),
        ]);
    }
    table
}

/// Every issue with its location, or `None` when the run is clean.
pub fn issue_table(report: &SuiteReport) -> Option<Table> {
    let issues: Vec<(String, String, &CheckResult, &Issue)> = rows(report)
        .into_iter()
        .flat_map(|(template, subject, result)| {
            result
                .outcome
                .issues()
                .iter()
                .map(move |issue| (template.clone(), subject.clone(), result, issue))
        })
        .collect();
    if issues.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template"),
        header_cell("Subject"),
        header_cell("Check"),
        header_cell("Line"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);

    for (template, subject, result, issue) in issues {
        table.add_row(vec![
            template_cell(&template),
            Cell::new(subject),
            Cell::new(result.check.label()),
            issue.line().map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(issue.code()).fg(Color::Red),
            Cell::new(issue.message()),
        ]);
    }
    Some(table)
}

/// Configured templates with their rule counts.
pub fn templates_table(templates: &[TemplateRules]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Template",
        "Primary key",
        "Required",
        "Numbers",
        "Dates",
        "Booleans",
        "Strategy",
    ]);
    apply_table_style(&mut table);
    for rules in templates {
        table.add_row(vec![
            Cell::new(&rules.name),
            Cell::new(rules.primary_key.join(", ")),
            Cell::new(rules.required.len()),
            Cell::new(rules.numbers.len()),
            Cell::new(rules.dates.len()),
            Cell::new(rules.booleans.len()),
            Cell::new(feedcheck_validate::strategy_for(rules).name()),
        ]);
    }
    table
}

pub fn render_json(report: &SuiteReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn rows(report: &SuiteReport) -> Vec<(String, String, &CheckResult)> {
    let files = report.files.iter().flat_map(|file| {
        let name = file.file_name();
        file.checks
            .iter()
            .map(move |result| (file.template.clone(), name.clone(), result))
    });
    let pairs = report.pairs.iter().flat_map(|pair| {
        let label = pair.label();
        pair.checks.iter().map(move |result| {
            let subject = result.subject.clone().unwrap_or_else(|| "-".to_string());
            (label.clone(), subject, result)
        })
    });
    files.chain(pairs).collect()
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(outcome: &Outcome) -> Cell {
    let cell = Cell::new(outcome.label());
    match outcome {
        Outcome::Pass => cell.fg(Color::Green),
        Outcome::Fail { .. } => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        Outcome::Skipped { .. } => cell.fg(Color::Yellow),
        Outcome::NotApplicable { .. } => cell.fg(Color::DarkGrey),
    }
}

fn note_cell(outcome: &Outcome) -> Cell {
    match outcome {
        Outcome::Skipped { reason } | Outcome::NotApplicable { reason } => dim_cell(reason),
        _ => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn template_cell(template: &str) -> Cell {
    Cell::new(template)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
