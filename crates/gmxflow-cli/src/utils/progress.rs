use gmxflow::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders pipeline progress as `[INFO]`/`[OK]` console lines, with a spinner
/// while a toolkit invocation is running.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner().with_style(Self::spinner_style());
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            if let Some(line) = console_line(&progress) {
                pb_guard.suspend(|| println!("{}", line));
            }

            match progress {
                Progress::StepStart { step, .. } => {
                    *pb_guard = ProgressBar::new_spinner().with_style(Self::spinner_style());
                    pb_guard.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                    pb_guard.set_message(format!("Step {}", step));
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                }
                Progress::StepFinish { .. } | Progress::PipelineFinish => {
                    pb_guard.finish_and_clear();
                }
                Progress::Message(_) => {}
            }
        })
    }

    /// Stops the spinner, e.g. after a step failed.
    pub fn abandon(&self) {
        if let Ok(pb) = self.pb.lock() {
            pb.finish_and_clear();
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}]")
            .expect("Failed to create spinner style template")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// The stdout line for a progress event, if it has one.
pub fn console_line(progress: &Progress) -> Option<String> {
    match progress {
        Progress::StepStart { step, label, .. } => {
            Some(format!("\n[INFO] Step {}: Executing {} ...", step, label))
        }
        Progress::StepFinish { .. } => Some("[OK] Success.".to_string()),
        Progress::PipelineFinish => Some("\n[DONE] Processing complete.".to_string()),
        Progress::Message(msg) => Some(format!("[INFO] {}", msg)),
    }
}
