//! Command implementations

pub mod completions;
pub mod config;
pub mod generate;

use std::path::Path;

use anyhow::Result;

use nativegen::util::config::{global_config_path, load_config, project_config_path, Config};

/// Load the layered configuration for the current directory.
///
/// An explicit `--config` file overrides both the project and global files.
pub fn effective_config(cwd: &Path, explicit: Option<&Path>) -> Result<Config> {
    let global = global_config_path();
    let mut config = load_config(global.as_deref(), &project_config_path(cwd));

    if let Some(path) = explicit {
        tracing::debug!("Loading config from {}", path.display());
        config.merge(Config::load(path)?);
    }

    Ok(config)
}
