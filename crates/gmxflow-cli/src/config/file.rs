use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileToolkitConfig {
    pub executable: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub check_inputs: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileGroupsConfig {
    pub center: Option<String>,
    pub rmsf: Option<String>,
    pub fit: Option<String>,
    pub system: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSelectionsConfig {
    pub center: Option<String>,
    pub rmsf: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileFilesConfig {
    pub index_structure: Option<PathBuf>,
    pub prefix: Option<String>,
    pub center_index: Option<PathBuf>,
    pub rmsf_index: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub fit_mode: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub toolkit: Option<FileToolkitConfig>,
    pub groups: Option<FileGroupsConfig>,
    pub selections: Option<FileSelectionsConfig>,
    pub files: Option<FileFilesConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
