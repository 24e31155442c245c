use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{field}': {value:?} ({reason})")]
    InvalidAnswer {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Interactive menu numbers (or names) of the index groups the toolkit is
/// asked to select. They depend on the toolkit's own group numbering and on
/// how many groups the index files define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIds {
    /// Group created from the centering selection (e.g. `a 6391`).
    pub center: String,
    /// Group created from the fluctuation selection (e.g. `r 333-337 & a CA`).
    pub rmsf: String,
    /// Least-squares fit group, usually Backbone.
    pub fit: String,
    /// Whole system.
    pub system: String,
}

impl Default for GroupIds {
    fn default() -> Self {
        Self {
            center: "17".to_string(),
            rmsf: "17".to_string(),
            fit: "4".to_string(),
            system: "0".to_string(),
        }
    }
}

/// Selection expressions typed into the index-building prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    pub center: String,
    pub rmsf: String,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            center: "a 6391".to_string(),
            rmsf: "r 333-337 & a CA".to_string(),
        }
    }
}

/// Names of every file the pipeline reads or writes, relative to the
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLayout {
    pub index_structure: PathBuf,
    pub structure: PathBuf,
    pub run_input: PathBuf,
    pub trajectory: PathBuf,
    pub center_index: PathBuf,
    pub whole_structure: PathBuf,
    pub centered_structure: PathBuf,
    pub whole_trajectory: PathBuf,
    pub centered_trajectory: PathBuf,
    pub fitted_trajectory: PathBuf,
    pub rmsf_index: PathBuf,
    pub report: PathBuf,
}

impl FileLayout {
    /// Derives the trajectory-family names from a single run prefix, so
    /// `md-250ns` yields `md-250ns.xtc`, `md-250ns_pbc.xtc`, and so on.
    pub fn with_prefix(index_structure: impl Into<PathBuf>, prefix: &str) -> Self {
        let name = |suffix: &str| PathBuf::from(format!("{prefix}{suffix}"));
        Self {
            index_structure: index_structure.into(),
            structure: name(".gro"),
            run_input: name(".tpr"),
            trajectory: name(".xtc"),
            center_index: PathBuf::from("center.ndx"),
            whole_structure: name("_pbc.gro"),
            centered_structure: name("_pbc_center.gro"),
            whole_trajectory: name("_pbc.xtc"),
            centered_trajectory: name("_pbc_center.xtc"),
            fitted_trajectory: name("_aligned_for_RMSF.xtc"),
            rmsf_index: PathBuf::from("rmsf_cal.ndx"),
            report: PathBuf::from("rmsf_deviations.xvg"),
        }
    }
}

impl Default for FileLayout {
    fn default() -> Self {
        Self::with_prefix("em.gro", "md-250ns")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub executable: String,
    pub working_dir: PathBuf,
    pub groups: GroupIds,
    pub selections: Selections,
    pub files: FileLayout,
    /// Value passed to `trjconv -fit`.
    pub fit_mode: String,
    /// Verify each step's declared inputs exist before issuing it.
    pub check_inputs: bool,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }

    /// Resolves a layout path against the working directory.
    pub fn resolve(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    executable: Option<String>,
    working_dir: Option<PathBuf>,
    groups: Option<GroupIds>,
    selections: Option<Selections>,
    files: Option<FileLayout>,
    fit_mode: Option<String>,
    check_inputs: bool,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = Some(executable.into());
        self
    }
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
    pub fn groups(mut self, groups: GroupIds) -> Self {
        self.groups = Some(groups);
        self
    }
    pub fn selections(mut self, selections: Selections) -> Self {
        self.selections = Some(selections);
        self
    }
    pub fn files(mut self, files: FileLayout) -> Self {
        self.files = Some(files);
        self
    }
    pub fn fit_mode(mut self, mode: impl Into<String>) -> Self {
        self.fit_mode = Some(mode.into());
        self
    }
    pub fn check_inputs(mut self, enabled: bool) -> Self {
        self.check_inputs = enabled;
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let executable = self
            .executable
            .ok_or(ConfigError::MissingParameter("executable"))?;
        if executable.trim().is_empty() {
            return Err(ConfigError::InvalidAnswer {
                field: "executable",
                value: executable,
                reason: "must not be empty",
            });
        }

        let groups = self.groups.unwrap_or_default();
        validate_answer("groups.center", &groups.center)?;
        validate_answer("groups.rmsf", &groups.rmsf)?;
        validate_answer("groups.fit", &groups.fit)?;
        validate_answer("groups.system", &groups.system)?;

        let selections = self.selections.unwrap_or_default();
        validate_answer("selections.center", &selections.center)?;
        validate_answer("selections.rmsf", &selections.rmsf)?;

        let fit_mode = self.fit_mode.unwrap_or_else(|| "rot+trans".to_string());
        if fit_mode.trim().is_empty() {
            return Err(ConfigError::InvalidAnswer {
                field: "fit_mode",
                value: fit_mode,
                reason: "must not be empty",
            });
        }

        Ok(PipelineConfig {
            executable,
            working_dir: self.working_dir.unwrap_or_else(|| PathBuf::from(".")),
            groups,
            selections,
            files: self.files.unwrap_or_default(),
            fit_mode,
            check_inputs: self.check_inputs,
        })
    }
}

fn validate_answer(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidAnswer {
            field,
            value: value.to_string(),
            reason: "must not be empty",
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(ConfigError::InvalidAnswer {
            field,
            value: value.to_string(),
            reason: "must be a single line",
        });
    }
    Ok(())
}
