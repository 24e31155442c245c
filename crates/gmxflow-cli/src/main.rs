mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use std::ffi::OsString;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        for line in e.console_report() {
            println!("{}", line);
        }
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = parse_args(std::env::args_os())?;
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook
        .install()
        .map_err(|e| CliError::Other(anyhow::anyhow!("{}", e)))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("gmxflow CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = match cli.command {
        Commands::Run(args) => {
            info!("Dispatching to 'run' command.");
            commands::run::run(args)
        }
        Commands::Plan(args) => {
            info!("Dispatching to 'plan' command.");
            commands::plan::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }

    command_result
}

/// Parses the command line. `--help` and `--version` print and exit
/// normally; usage errors become [`CliError::Argument`] so they share the
/// exit status of every other failure.
fn parse_args<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).or_else(|e| {
        if e.use_stderr() {
            Err(CliError::Argument(e.to_string().trim_end().to_string()))
        } else {
            e.exit()
        }
    })
}
