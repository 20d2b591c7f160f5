use pipe::engine::config as core_config;
use std::path::PathBuf;

pub struct FilterAppConfig {
    pub output: PathBuf,
    pub core_config: core_config::FilterConfig,
}
