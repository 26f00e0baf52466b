//! Implementation of `nativegen generate`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

use crate::codegen::{self, GenerationContext, ZigGenerator};
use crate::core::database::NativeDatabase;
use crate::util::config::Config;
use crate::util::fs::{glob_files, write_string};

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Natives database files or glob patterns
    pub inputs: Vec<String>,

    /// Directory relative input patterns are resolved against
    pub base_dir: PathBuf,

    /// Output file (None = only return the source)
    pub output: Option<PathBuf>,

    /// Namespaces to generate (empty = all)
    pub namespaces: Vec<String>,

    /// Effective configuration
    pub config: Config,

    /// Timestamp written into the header
    pub generated_at: DateTime<Utc>,
}

impl GenerateOptions {
    /// Create options for the given inputs, stamped with the current time.
    pub fn new(base_dir: impl Into<PathBuf>, inputs: Vec<String>) -> Self {
        GenerateOptions {
            inputs,
            base_dir: base_dir.into(),
            output: None,
            namespaces: Vec::new(),
            config: Config::default(),
            generated_at: Utc::now(),
        }
    }

    /// Write the generated source to a file.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Only generate the given namespaces.
    pub fn with_namespaces(mut self, namespaces: Vec<String>) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Use the given configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Override the header timestamp.
    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Database files that were read
    pub inputs: Vec<PathBuf>,

    /// Every namespace in the inputs, before filtering
    pub available: Vec<String>,

    /// Namespaces generated
    pub namespaces: usize,

    /// Natives generated
    pub natives: usize,

    /// Generated source
    pub source: String,

    /// File the source was written to
    pub output: Option<PathBuf>,
}

/// Load and merge every database matched by `patterns`.
pub fn load_databases(base_dir: &Path, patterns: &[String]) -> Result<(NativeDatabase, Vec<PathBuf>)> {
    let files = glob_files(base_dir, patterns)?;
    if files.is_empty() {
        bail!(
            "no natives database matched: {}",
            patterns.join(", ")
        );
    }

    let mut database = NativeDatabase::new();
    for file in &files {
        database.merge(NativeDatabase::load(file)?);
    }

    Ok((database, files))
}

/// Generate Zig bindings.
pub fn generate_bindings(opts: &GenerateOptions) -> Result<GenerateResult> {
    let writer = opts.config.writer_settings()?;
    let settings = opts.config.zig_settings()?;
    let context = GenerationContext::new(opts.generated_at, opts.config.origin()?);

    let (mut database, inputs) = load_databases(&opts.base_dir, &opts.inputs)?;
    let available = database
        .namespaces()
        .map(|(name, _)| name.to_string())
        .collect();
    database.retain_namespaces(&opts.namespaces);

    tracing::debug!(
        "Generating {} natives in {} namespaces",
        database.native_count(),
        database.namespace_count()
    );

    let generator = ZigGenerator::new(settings, writer, context);
    let source = codegen::generate(generator, &database)?;

    if let Some(ref output) = opts.output {
        write_string(output, &source)?;
        tracing::info!("Wrote {}", output.display());
    }

    Ok(GenerateResult {
        inputs,
        available,
        namespaces: database.namespace_count(),
        natives: database.native_count(),
        source,
        output: opts.output.clone(),
    })
}
