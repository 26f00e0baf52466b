//! Configuration file support for nativegen.
//!
//! nativegen reads two configuration file locations:
//! - Global: `~/.nativegen/config.toml` - User-wide defaults
//! - Project: `nativegen.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. An explicit
//! `--config` file and command-line flags override both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codegen::line_writer::{LineEnding, WriterSettings};
use crate::codegen::zig::ZigSettings;

/// Name of the project configuration file.
pub const PROJECT_CONFIG_NAME: &str = "nativegen.toml";

/// Documentation site linked from generated bindings by default.
pub const DEFAULT_ORIGIN: &str = "https://nativedb.dotindustries.dev";

/// Indentation widths offered for generated code.
pub const INDENT_WIDTHS: [usize; 4] = [1, 2, 4, 8];

/// nativegen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout of the generated document
    pub output: OutputConfig,

    /// Zig generator options
    pub zig: ZigConfig,

    /// Documentation links
    pub links: LinksConfig,
}

/// Layout settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Spaces per indentation level (1, 2, 4 or 8)
    pub indent_width: Option<usize>,

    /// Line ending style (lf, crlf)
    pub line_ending: Option<LineEnding>,
}

/// Zig generator settings. Unset fields fall back to [`ZigSettings::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigConfig {
    pub generate_comments: Option<bool>,
    pub include_links: Option<bool>,
    pub use_native_types: Option<bool>,
    pub enforce_naming: Option<bool>,
    pub one_line_functions: Option<bool>,
    pub includes: Option<String>,
    pub invoke_function: Option<String>,
}

/// Link settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Base URL of the natives documentation site
    pub origin: Option<String>,
}

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid indent width {0}, valid values: 1, 2, 4, 8")]
    InvalidIndentWidth(usize),

    #[error("invalid link origin '{origin}'")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },

    #[error("link origin '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("invoke function name must not be empty")]
    EmptyInvokeFunction,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Output settings
        if other.output.indent_width.is_some() {
            self.output.indent_width = other.output.indent_width;
        }
        if other.output.line_ending.is_some() {
            self.output.line_ending = other.output.line_ending;
        }

        // Zig settings
        let zig = other.zig;
        if zig.generate_comments.is_some() {
            self.zig.generate_comments = zig.generate_comments;
        }
        if zig.include_links.is_some() {
            self.zig.include_links = zig.include_links;
        }
        if zig.use_native_types.is_some() {
            self.zig.use_native_types = zig.use_native_types;
        }
        if zig.enforce_naming.is_some() {
            self.zig.enforce_naming = zig.enforce_naming;
        }
        if zig.one_line_functions.is_some() {
            self.zig.one_line_functions = zig.one_line_functions;
        }
        if zig.includes.is_some() {
            self.zig.includes = zig.includes;
        }
        if zig.invoke_function.is_some() {
            self.zig.invoke_function = zig.invoke_function;
        }

        // Link settings
        if other.links.origin.is_some() {
            self.links.origin = other.links.origin;
        }
    }

    /// Resolve the writer layout.
    pub fn writer_settings(&self) -> Result<WriterSettings, ConfigError> {
        let width = self.output.indent_width.unwrap_or(4);
        if !INDENT_WIDTHS.contains(&width) {
            return Err(ConfigError::InvalidIndentWidth(width));
        }

        Ok(WriterSettings {
            indentation: " ".repeat(width),
            line_ending: self.output.line_ending.unwrap_or_default(),
        })
    }

    /// Resolve the Zig generator settings.
    pub fn zig_settings(&self) -> Result<ZigSettings, ConfigError> {
        let defaults = ZigSettings::default();
        let zig = &self.zig;

        let invoke_function = zig
            .invoke_function
            .clone()
            .unwrap_or(defaults.invoke_function);
        if invoke_function.trim().is_empty() {
            return Err(ConfigError::EmptyInvokeFunction);
        }

        Ok(ZigSettings {
            generate_comments: zig.generate_comments.unwrap_or(defaults.generate_comments),
            include_links: zig.include_links.unwrap_or(defaults.include_links),
            use_native_types: zig.use_native_types.unwrap_or(defaults.use_native_types),
            enforce_naming: zig.enforce_naming.unwrap_or(defaults.enforce_naming),
            one_line_functions: zig.one_line_functions.unwrap_or(defaults.one_line_functions),
            includes: zig.includes.clone().unwrap_or(defaults.includes),
            invoke_function,
        })
    }

    /// Resolve and validate the documentation origin.
    pub fn origin(&self) -> Result<String, ConfigError> {
        let origin = self.links.origin.as_deref().unwrap_or(DEFAULT_ORIGIN);

        let url = url::Url::parse(origin).map_err(|source| ConfigError::InvalidOrigin {
            origin: origin.to_string(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(origin.to_string()));
        }

        Ok(origin.to_string())
    }

    /// Validate every field and return a config with all of them set.
    pub fn resolved(&self) -> Result<Config, ConfigError> {
        let writer = self.writer_settings()?;
        let zig = self.zig_settings()?;

        Ok(Config {
            output: OutputConfig {
                indent_width: Some(writer.indentation.len()),
                line_ending: Some(writer.line_ending),
            },
            zig: ZigConfig {
                generate_comments: Some(zig.generate_comments),
                include_links: Some(zig.include_links),
                use_native_types: Some(zig.use_native_types),
                enforce_naming: Some(zig.enforce_naming),
                one_line_functions: Some(zig.one_line_functions),
                includes: Some(zig.includes),
                invoke_function: Some(zig.invoke_function),
            },
            links: LinksConfig {
                origin: Some(self.origin()?),
            },
        })
    }
}

/// Get the global nativegen config directory (~/.nativegen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".nativegen"))
}

/// Get the global config path (~/.nativegen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (nativegen.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_NAME)
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (nativegen.toml)
/// 2. Global config (~/.nativegen/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    config.merge(Config::load_or_default(project_path));

    config
}
