use anyhow::{Context, Result};
use clap::Parser;
use quick_du::config::{CliArgs, ScanConfig};
use quick_du::error_handler::show_error;
use quick_du::printer::{build_summary, print_total};
use quick_du::scanner::Scanner;
use quick_du::source::LocalDisk;
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode
{
    // Malformed options exit here with clap's usage text.
    let args = CliArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            show_error(&format!("{:#}", error));
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()>
{
    let config = ScanConfig::from_args(args).context("invalid configuration")?;

    setup_logging(config.verbose);

    if let Some(threshold) = config.threshold {
        debug!(bytes = threshold.bytes(), "threshold parsed, only the root total is reported");
    }

    let scanner = Scanner::new(LocalDisk, config.jobs);
    let report = scanner.scan(&config.root)?;

    info!("{}", build_summary(&report));

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    print_total(&mut handle, &report, config.human_readable, &config.root).context("failed to write output")?;

    Ok(())
}

fn setup_logging(verbose: bool)
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("quick_du=debug")
        } else {
            EnvFilter::new("quick_du=error")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
