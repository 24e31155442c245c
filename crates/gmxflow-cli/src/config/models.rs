use gmxflow::engine::config as core_config;
use std::path::PathBuf;

#[derive(Debug)]
pub struct AppConfig {
    /// Config file the values were read from, if any.
    pub source: Option<PathBuf>,
    pub core_config: core_config::PipelineConfig,
}
