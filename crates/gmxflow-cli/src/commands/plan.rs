use crate::cli::PlanArgs;
use crate::config::build_config;
use crate::error::Result;
use gmxflow::workflows;
use std::path::PathBuf;

pub fn run(args: PlanArgs) -> Result<()> {
    let app = build_config(&args.pipeline, false)?;
    let plan = workflows::rmsf::plan(&app.core_config)?;

    println!(
        "Working directory: {}",
        app.core_config.working_dir.display()
    );
    for planned in &plan {
        println!("\nStep {}", planned.step);
        println!("  command: {}", planned.command);
        if let Some(input) = planned.command.rendered_input() {
            println!("  stdin:   {}", input.escape_debug());
        }
        println!("  reads:   {}", join_paths(&planned.inputs));
        println!("  writes:  {}", join_paths(&planned.outputs));
    }

    Ok(())
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
