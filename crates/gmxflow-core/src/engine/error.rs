use thiserror::Error;

use super::config::ConfigError;
use super::steps::Step;
use crate::core::command::ScriptError;
use crate::core::runner::RunnerError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid pipeline configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input script for step {step}: {source}")]
    InvalidScript {
        step: Step,
        #[source]
        source: ScriptError,
    },

    #[error("Step {step} could not be started: {source}")]
    Spawn {
        step: Step,
        #[source]
        source: RunnerError,
    },

    #[error("Step {step} failed with {}: {command}", describe_code(code))]
    StepFailed {
        step: Step,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Step {step} requires '{path}', which does not exist", path = path.display())]
    MissingInput { step: Step, path: PathBuf },
}

impl PipelineError {
    /// The step the error originated from, if any.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Config(_) => None,
            Self::InvalidScript { step, .. }
            | Self::Spawn { step, .. }
            | Self::StepFailed { step, .. }
            | Self::MissingInput { step, .. } => Some(*step),
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => "termination by signal".to_string(),
    }
}
