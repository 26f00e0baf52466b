//! `nativegen config` command

use anyhow::{Context, Result};

use crate::cli::ConfigArgs;
use crate::commands::effective_config;

pub fn execute(args: ConfigArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = effective_config(&cwd, args.config.as_deref())?;

    let resolved = config.resolved()?;
    let toml = toml::to_string_pretty(&resolved).context("failed to serialize configuration")?;
    print!("{}", toml);

    Ok(())
}
