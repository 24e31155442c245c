use crate::cli::RunArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use gmxflow::core::runner::ProcessRunner;
use gmxflow::engine::progress::ProgressReporter;
use gmxflow::workflows;
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    let app = build_config(&args.pipeline, args.check_inputs)?;
    let config = app.core_config;
    match &app.source {
        Some(path) => info!("Configuration loaded from {:?}", path),
        None => info!("No configuration file given, using built-in defaults."),
    }

    if !config.working_dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "Working directory does not exist: {}",
                config.working_dir.display()
            ),
        )
        .into());
    }

    let runner = ProcessRunner::new().with_working_dir(&config.working_dir);
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the fluctuation workflow...");
    let result = workflows::rmsf::run(&config, &runner, &reporter);
    progress_handler.abandon();
    let report = result?;

    let total: std::time::Duration = report.steps.iter().map(|r| r.elapsed).sum();
    info!(
        "Workflow finished: {} step(s) in {:.1}s.",
        report.steps.len(),
        total.as_secs_f64()
    );
    println!("Fluctuation report: {}", report.report_path.display());

    Ok(())
}
