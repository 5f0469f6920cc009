use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ruleprint_reports::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print a default configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render an analysis report dump as JSON
    Render {
        /// Report dump (JSON) produced by the rule engine
        report: PathBuf,

        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output layout: pretty or compact
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub report: PathBuf,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub verbosity: u8,
    pub config: Option<PathBuf>,
}

pub fn validate_render_args(args: &RenderArgs) -> Result<()> {
    if !args.report.is_file() {
        return Err(anyhow::anyhow!(
            "Report file not found: {}",
            args.report.display()
        ));
    }

    if let Some(format) = &args.format {
        format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    if let Some(output) = &args.output {
        if output.is_dir() {
            return Err(anyhow::anyhow!(
                "Output path is a directory: {}",
                output.display()
            ));
        }
    }

    Ok(())
}
