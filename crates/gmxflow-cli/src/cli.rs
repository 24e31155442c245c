use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "gmxflow - Runs the GROMACS trajectory preparation and per-residue RMSF pipeline with scripted group selections.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute all eight pipeline steps in order, stopping at the first failure.
    Run(RunArgs),
    /// Print the commands and scripted answers of every step without running them.
    Plan(PlanArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Check that each step's input files exist before issuing it.
    #[arg(long)]
    pub check_inputs: bool,
}

/// Arguments for the `plan` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Configuration sources shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Path to a pipeline configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GROMACS executable to invoke (e.g., 'gmx' or 'gmx_mpi').
    #[arg(long = "gmx", value_name = "EXE")]
    pub executable: Option<String>,

    /// Directory containing the input files; all outputs are written here.
    #[arg(short = 'C', long = "workdir", value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Override the menu group used for centering.
    #[arg(long, value_name = "GROUP")]
    pub center_group: Option<String>,

    /// Override the menu group used for the fluctuation calculation.
    #[arg(long, value_name = "GROUP")]
    pub rmsf_group: Option<String>,

    /// Override the least-squares fit group (usually Backbone).
    #[arg(long, value_name = "GROUP")]
    pub fit_group: Option<String>,

    /// Override the whole-system output group.
    #[arg(long, value_name = "GROUP")]
    pub system_group: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S groups.fit=Backbone
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
