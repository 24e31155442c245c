use gmxflow::engine::error::PipelineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Console lines describing the failure.
    ///
    /// A toolkit step that exited non-zero is an `[ERROR]` with the command
    /// and the toolkit's own error output; anything else stopped the run from
    /// the host side and is `[CRITICAL]`.
    pub fn console_report(&self) -> Vec<String> {
        match self {
            CliError::Pipeline(PipelineError::StepFailed {
                command, stderr, ..
            }) => vec![
                format!("[ERROR] Command failed:\n{}", command),
                format!("[ERROR] GROMACS output:\n{}", stderr.trim_end()),
            ],
            other => vec![format!("[CRITICAL] Pipeline failed: {}", other)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmxflow::core::runner::RunnerError;
    use gmxflow::engine::steps::Step;

    #[test]
    fn step_failure_reports_command_and_toolkit_output() {
        let err = CliError::from(PipelineError::StepFailed {
            step: Step::WholeTrajectory,
            command: "gmx_mpi trjconv -f md-250ns.xtc".to_string(),
            code: Some(2),
            stderr: "Fatal error:\nFile not found\n".to_string(),
        });

        assert_eq!(
            err.console_report(),
            vec![
                "[ERROR] Command failed:\ngmx_mpi trjconv -f md-250ns.xtc".to_string(),
                "[ERROR] GROMACS output:\nFatal error:\nFile not found".to_string(),
            ]
        );
    }

    #[test]
    fn host_side_failures_are_critical() {
        let err = CliError::from(PipelineError::Spawn {
            step: Step::CenterIndex,
            source: RunnerError::NotFound {
                program: "gmx_mpi".to_string(),
            },
        });

        let report = err.console_report();
        assert_eq!(report.len(), 1);
        assert!(report[0].starts_with("[CRITICAL] Pipeline failed: Step 1/8"));
        assert!(report[0].contains("gmx_mpi"));
    }

    #[test]
    fn config_errors_are_critical() {
        let err = CliError::Config("bad".to_string());
        assert_eq!(
            err.console_report(),
            vec!["[CRITICAL] Pipeline failed: Configuration error: bad".to_string()]
        );
    }
}
