use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use feedcheck_cli::settings::ConfigOverrides;
use feedcheck_cli::summary::{apply_table_style, print_summary, render_json, templates_table};
use feedcheck_model::SuiteReport;
use feedcheck_standards::install_config;
use feedcheck_validate::run_suite;

use crate::cli::{CheckArgs, ReportFormatArg, TemplatesArgs};

pub fn run_check(args: &CheckArgs) -> Result<SuiteReport> {
    let overrides = ConfigOverrides {
        config_file: args.config.clone(),
        source_dir: args.source.clone(),
        headers_dir: args.headers.clone(),
        templates: args.templates.clone(),
    };
    let config = install_config(overrides.resolve(Path::new("."))?)
        .context("install configuration")?;

    let report = run_suite(config).with_context(|| {
        format!("validate feed files in {}", config.source_dir.display())
    })?;

    match args.format {
        ReportFormatArg::Table => print_summary(&report),
        ReportFormatArg::Json => println!("{}", render_json(&report).context("render report")?),
    }
    if let Some(path) = &args.output {
        let json = render_json(&report).context("render report")?;
        std::fs::write(path, json)
            .with_context(|| format!("write report {}", path.display()))?;
        info!(path = %path.display(), "wrote report");
    }
    Ok(report)
}

pub fn run_templates(args: &TemplatesArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        config_file: args.config.clone(),
        ..ConfigOverrides::default()
    };
    let config = overrides.resolve(Path::new("."))?;
    println!("{}", templates_table(&config.templates));
    if !config.pairs.is_empty() {
        let mut pairs = comfy_table::Table::new();
        pairs.set_header(vec!["Parent", "Child"]);
        apply_table_style(&mut pairs);
        for pair in &config.pairs {
            pairs.add_row(vec![pair.parent.as_str(), pair.child.as_str()]);
        }
        println!("{pairs}");
    }
    Ok(())
}
