mod cli;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, warn};

use rbac_simplify::{Normalizer, RuleDocument, SimplifyError};

use crate::cli::CliArgs;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the canonical document.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<SimplifyError>()
                .map_or("UNEXPECTED", SimplifyError::error_code);
            debug!(code, "run failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    let Some(input_file) = args.input_file else {
        warn!("no input file provided");
        CliArgs::command()
            .print_help()
            .context("failed to print usage")?;
        return Ok(());
    };

    let document = RuleDocument::load(&input_file)?;
    let (output, stats) = Normalizer::new()
        .run_with_stats(&document.rules)
        .with_context(|| format!("failed to normalize {}", input_file.display()))?;
    debug!(
        input_rules = stats.input_rules,
        output_rules = stats.output_rules,
        format = %args.output,
        "rendering canonical document"
    );

    let rendered = RuleDocument::from_output(output).render(args.output)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .context("failed to write output")?;
    Ok(())
}
