use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use ruleprint_core::Report;
use ruleprint_reports::{JsonRenderer, deliver};

use crate::cli::args::{RenderArgs, validate_render_args};
use crate::config::RuleprintConfig;

/// Read a report dump written by the rule engine.
pub fn load_report(path: &Path) -> Result<Report> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    let report: Report = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse report {}", path.display()))?;
    Ok(report)
}

pub fn run_render_command(args: RenderArgs) -> Result<()> {
    validate_render_args(&args)?;

    let env_vars: HashMap<String, String> = std::env::vars().collect();
    let config = RuleprintConfig::load_with_precedence(args.config.as_deref(), &args, &env_vars)?;

    render_with_config(&args, &config)
}

/// Render `args.report` with an already-resolved configuration.
pub fn render_with_config(args: &RenderArgs, config: &RuleprintConfig) -> Result<()> {
    let report = load_report(&args.report)?;
    tracing::info!(
        "Loaded {} violations and {} errors from {}",
        report.violations().len(),
        report.errors().len(),
        args.report.display()
    );

    let renderer = JsonRenderer::new(config.to_metadata(), config.to_encode_options());

    // Nothing is created or written until the document is fully encoded.
    let text = renderer
        .render_to_string(&report)
        .with_context(|| format!("Failed to render {}", args.report.display()))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            deliver(&text, &mut writer)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            deliver(&text, &mut handle).context("Failed to write report to stdout")?;
        }
    }

    Ok(())
}
