use crate::core::runner::CommandRunner;
use crate::engine::config::PipelineConfig;
use crate::engine::error::PipelineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::steps::{Plan, PlannedStep, Step};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub command: String,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub steps: Vec<StepRecord>,
    /// Location of the fluctuation report, resolved against the working directory.
    pub report_path: PathBuf,
}

/// Resolves all eight invocations without running any of them.
pub fn plan(config: &PipelineConfig) -> Result<Plan, PipelineError> {
    Step::ALL
        .into_iter()
        .map(|step| -> Result<PlannedStep, PipelineError> {
            let command = step
                .command(config)
                .map_err(|source| PipelineError::InvalidScript { step, source })?;
            Ok(PlannedStep {
                step,
                command,
                inputs: step.inputs(config),
                outputs: step.outputs(config),
            })
        })
        .collect()
}

/// Runs the full pipeline, stopping at the first step that fails.
///
/// The whole plan is built before anything runs, so a configuration that
/// cannot produce a valid script for a late step never starts step 1.
#[instrument(skip_all, name = "rmsf_workflow")]
pub fn run(
    config: &PipelineConfig,
    runner: &dyn CommandRunner,
    reporter: &ProgressReporter,
) -> Result<PipelineReport, PipelineError> {
    let plan = plan(config)?;
    info!(
        executable = %config.executable,
        working_dir = %config.working_dir.display(),
        "Starting fluctuation pipeline with {} steps.",
        plan.len()
    );

    if config.check_inputs {
        reporter.report(Progress::Message(
            "Input files are checked before each step.".to_string(),
        ));
    }

    let mut records = Vec::with_capacity(plan.len());
    for planned in &plan {
        if config.check_inputs {
            check_inputs(config, planned)?;
        }
        records.push(execute(planned, runner, reporter)?);
    }

    reporter.report(Progress::PipelineFinish);
    let report_path = config.resolve(&config.files.report);
    info!("Pipeline complete. Report written to {:?}", report_path);

    Ok(PipelineReport {
        steps: records,
        report_path,
    })
}

fn check_inputs(config: &PipelineConfig, planned: &PlannedStep) -> Result<(), PipelineError> {
    for input in &planned.inputs {
        let resolved = config.resolve(input);
        if !resolved.exists() {
            return Err(PipelineError::MissingInput {
                step: planned.step,
                path: resolved,
            });
        }
    }
    Ok(())
}

#[instrument(skip_all, fields(step = planned.step.number()))]
fn execute(
    planned: &PlannedStep,
    runner: &dyn CommandRunner,
    reporter: &ProgressReporter,
) -> Result<StepRecord, PipelineError> {
    let step = planned.step;
    let command = planned.command.to_string();

    reporter.report(Progress::StepStart {
        step,
        label: planned.command.label(),
    });
    info!("Executing step {}: {}", step, command);

    let started = Instant::now();
    let output = runner
        .run(&planned.command)
        .map_err(|source| PipelineError::Spawn { step, source })?;
    let elapsed = started.elapsed();

    if !output.is_success() {
        if std::str::from_utf8(&output.stderr).is_err() {
            warn!("Toolkit error output is not valid UTF-8; showing a lossy conversion.");
        }
        return Err(PipelineError::StepFailed {
            step,
            command,
            code: output.code,
            stderr: output.stderr_lossy(),
        });
    }

    debug!(elapsed_ms = elapsed.as_millis() as u64, "Step succeeded");
    reporter.report(Progress::StepFinish { step });

    Ok(StepRecord {
        step,
        command,
        elapsed,
    })
}
