use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Args, Commands, RenderArgs};
use crate::cli::commands::run_render_command;
use crate::config::RuleprintConfig;

pub struct RootCommand;

impl RootCommand {
    pub fn execute() -> Result<()> {
        let args = Args::parse();
        init_logging(args.verbosity);

        if args.generate_config {
            println!("{}", RuleprintConfig::generate_default_config());
            return Ok(());
        }

        match &args.command {
            Some(Commands::Render {
                report,
                output,
                format,
            }) => {
                let render_args = RenderArgs {
                    report: report.clone(),
                    output: output.clone(),
                    format: format.clone(),
                    verbosity: args.verbosity,
                    config: args.config.clone(),
                };

                run_render_command(render_args)
            }
            None => Err(anyhow::anyhow!(
                "No command given; try `ruleprint render <REPORT>`"
            )),
        }
    }
}

/// Logs go to stderr; stdout carries the rendered document.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
