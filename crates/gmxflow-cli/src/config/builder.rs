use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::PipelineArgs;
use crate::error::{CliError, Result};
use gmxflow::engine::config as core_config;
use gmxflow::engine::error::PipelineError;
use std::path::PathBuf;

/// Merges defaults, the config file, `--set` overrides, and dedicated flags,
/// in increasing order of precedence.
pub fn build_config(args: &PipelineArgs, check_inputs_flag: bool) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let toolkit_file = file_config.toolkit.take().unwrap_or_default();
    let executable = args
        .executable
        .clone()
        .or(toolkit_file.executable)
        .unwrap_or(defaults.executable);
    let working_dir = args
        .working_dir
        .clone()
        .or(toolkit_file.working_dir)
        .unwrap_or_else(|| PathBuf::from(&defaults.working_dir));
    let check_inputs = check_inputs_flag || toolkit_file.check_inputs.unwrap_or(false);

    let groups_file = file_config.groups.take().unwrap_or_default();
    let groups = core_config::GroupIds {
        center: args
            .center_group
            .clone()
            .or(groups_file.center)
            .unwrap_or(defaults.center_group),
        rmsf: args
            .rmsf_group
            .clone()
            .or(groups_file.rmsf)
            .unwrap_or(defaults.rmsf_group),
        fit: args
            .fit_group
            .clone()
            .or(groups_file.fit)
            .unwrap_or(defaults.fit_group),
        system: args
            .system_group
            .clone()
            .or(groups_file.system)
            .unwrap_or(defaults.system_group),
    };

    let selections_file = file_config.selections.take().unwrap_or_default();
    let selections = core_config::Selections {
        center: selections_file
            .center
            .unwrap_or(defaults.center_selection),
        rmsf: selections_file.rmsf.unwrap_or(defaults.rmsf_selection),
    };

    let files_file = file_config.files.take().unwrap_or_default();
    let prefix = files_file.prefix.unwrap_or(defaults.prefix);
    if prefix.trim().is_empty() {
        return Err(CliError::Config("`files.prefix` must not be empty.".to_string()));
    }
    let index_structure = files_file
        .index_structure
        .unwrap_or_else(|| PathBuf::from(&defaults.index_structure));
    let mut files = core_config::FileLayout::with_prefix(index_structure, &prefix);
    files.center_index = files_file
        .center_index
        .unwrap_or_else(|| PathBuf::from(&defaults.center_index));
    files.rmsf_index = files_file
        .rmsf_index
        .unwrap_or_else(|| PathBuf::from(&defaults.rmsf_index));
    files.report = files_file
        .report
        .unwrap_or_else(|| PathBuf::from(&defaults.report));
    let fit_mode = files_file.fit_mode.unwrap_or(defaults.fit_mode);

    let core_config = core_config::PipelineConfigBuilder::new()
        .executable(executable)
        .working_dir(working_dir)
        .groups(groups)
        .selections(selections)
        .files(files)
        .fit_mode(fit_mode)
        .check_inputs(check_inputs)
        .build()
        .map_err(PipelineError::from)?;

    Ok(AppConfig {
        source: args.config.clone(),
        core_config,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let value = value.to_string();

        match key {
            "toolkit.executable" => {
                config.toolkit.get_or_insert_with(Default::default).executable = Some(value);
            }
            "toolkit.working-dir" => {
                config.toolkit.get_or_insert_with(Default::default).working_dir =
                    Some(PathBuf::from(value));
            }
            "toolkit.check-inputs" => {
                config.toolkit.get_or_insert_with(Default::default).check_inputs =
                    Some(value.parse().map_err(|_| {
                        CliError::Config(format!("Invalid boolean value for {}: {}", key, value))
                    })?);
            }
            "groups.center" => {
                config.groups.get_or_insert_with(Default::default).center = Some(value);
            }
            "groups.rmsf" => {
                config.groups.get_or_insert_with(Default::default).rmsf = Some(value);
            }
            "groups.fit" => {
                config.groups.get_or_insert_with(Default::default).fit = Some(value);
            }
            "groups.system" => {
                config.groups.get_or_insert_with(Default::default).system = Some(value);
            }
            "selections.center" => {
                config.selections.get_or_insert_with(Default::default).center = Some(value);
            }
            "selections.rmsf" => {
                config.selections.get_or_insert_with(Default::default).rmsf = Some(value);
            }
            "files.prefix" => {
                config.files.get_or_insert_with(Default::default).prefix = Some(value);
            }
            "files.index-structure" => {
                config.files.get_or_insert_with(Default::default).index_structure =
                    Some(PathBuf::from(value));
            }
            "files.report" => {
                config.files.get_or_insert_with(Default::default).report =
                    Some(PathBuf::from(value));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &std::path::Path, toml: &str) -> PathBuf {
        let path = dir.join("gmxflow.toml");
        fs::write(&path, toml).unwrap();
        path
    }

    #[test]
    fn defaults_reproduce_reference_pipeline() {
        let app = build_config(&PipelineArgs::default(), false).expect("build ok");
        let cfg = app.core_config;

        assert!(app.source.is_none());
        assert_eq!(cfg.executable, "gmx_mpi");
        assert_eq!(cfg.working_dir, PathBuf::from("."));
        assert_eq!(cfg.groups, core_config::GroupIds::default());
        assert_eq!(cfg.selections, core_config::Selections::default());
        assert_eq!(cfg.files, core_config::FileLayout::default());
        assert_eq!(cfg.fit_mode, "rot+trans");
        assert!(!cfg.check_inputs);
    }

    #[test]
    fn file_values_are_merged() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [toolkit]
            executable = "gmx"
            working-dir = "/scratch/run7"
            check-inputs = true

            [groups]
            center = "19"
            fit = "Backbone"

            [selections]
            rmsf = "r 10-20 & a CA"

            [files]
            prefix = "md-100ns"
            index-structure = "npt.gro"
            report = "rmsf.xvg"
            "#,
        );
        let args = PipelineArgs {
            config: Some(path.clone()),
            ..PipelineArgs::default()
        };

        let app = build_config(&args, false).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(app.source, Some(path));
        assert_eq!(cfg.executable, "gmx");
        assert_eq!(cfg.working_dir, PathBuf::from("/scratch/run7"));
        assert!(cfg.check_inputs);
        assert_eq!(cfg.groups.center, "19");
        assert_eq!(cfg.groups.fit, "Backbone");
        assert_eq!(cfg.groups.system, "0");
        assert_eq!(cfg.selections.rmsf, "r 10-20 & a CA");
        assert_eq!(cfg.selections.center, "a 6391");
        assert_eq!(cfg.files.trajectory, PathBuf::from("md-100ns.xtc"));
        assert_eq!(cfg.files.index_structure, PathBuf::from("npt.gro"));
        assert_eq!(cfg.files.report, PathBuf::from("rmsf.xvg"));
        assert_eq!(cfg.files.center_index, PathBuf::from("center.ndx"));
    }

    #[test]
    fn set_values_override_file_and_flags_override_both() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [groups]
            center = "19"
            rmsf = "20"
            "#,
        );
        let args = PipelineArgs {
            config: Some(path),
            center_group: Some("21".to_string()),
            set_values: vec![
                "groups.center=22".to_string(),
                "groups.rmsf=23".to_string(),
                "toolkit.executable=gmx_d".to_string(),
            ],
            ..PipelineArgs::default()
        };

        let cfg = build_config(&args, true).expect("build ok").core_config;

        assert_eq!(cfg.groups.center, "21");
        assert_eq!(cfg.groups.rmsf, "23");
        assert_eq!(cfg.executable, "gmx_d");
        assert!(cfg.check_inputs);
    }

    #[test]
    fn unknown_file_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[groups]\nligand = \"13\"\n");
        let args = PipelineArgs {
            config: Some(path),
            ..PipelineArgs::default()
        };

        let result = build_config(&args, false);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn malformed_and_unknown_set_values_are_rejected() {
        for bad in ["groups.center", "groups.ligand=13", "toolkit.check-inputs=maybe"] {
            let args = PipelineArgs {
                set_values: vec![bad.to_string()],
                ..PipelineArgs::default()
            };
            assert!(
                matches!(build_config(&args, false), Err(CliError::Config(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn blank_group_is_a_typed_pipeline_config_error() {
        let args = PipelineArgs {
            system_group: Some(" ".to_string()),
            ..PipelineArgs::default()
        };
        let Err(CliError::Pipeline(PipelineError::Config(err))) = build_config(&args, false)
        else {
            panic!("expected pipeline config error");
        };
        assert!(matches!(
            err,
            core_config::ConfigError::InvalidAnswer {
                field: "groups.system",
                ..
            }
        ));
    }

    #[test]
    fn multi_line_selection_from_set_is_reported_as_critical() {
        let args = PipelineArgs {
            set_values: vec!["selections.rmsf=r 333-337\nq".to_string()],
            ..PipelineArgs::default()
        };
        let err = build_config(&args, false).unwrap_err();
        assert!(
            err.console_report()[0]
                .starts_with("[CRITICAL] Pipeline failed: Invalid pipeline configuration")
        );
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let args = PipelineArgs {
            config: Some(PathBuf::from("/nonexistent/gmxflow.toml")),
            ..PipelineArgs::default()
        };
        assert!(matches!(build_config(&args, false), Err(CliError::Io(_))));
    }
}
