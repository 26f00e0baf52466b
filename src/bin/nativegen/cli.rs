//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use nativegen::codegen::LineEnding;

/// nativegen - Generate Zig bindings from a natives database
#[derive(Parser)]
#[command(name = "nativegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Zig bindings
    Generate(GenerateArgs),

    /// Print the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Natives database files or glob patterns
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Write the bindings to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Additional config file (overrides nativegen.toml)
    #[arg(long, env = "NATIVEGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only generate these namespaces (repeatable)
    #[arg(short, long = "namespace", value_name = "NAMESPACE")]
    pub namespaces: Vec<String>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Flags that override configuration values.
#[derive(Args, Default)]
pub struct OverrideArgs {
    /// Spaces per indentation level (1, 2, 4 or 8)
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Line ending style (lf, crlf)
    #[arg(long, value_name = "STYLE")]
    pub line_ending: Option<LineEnding>,

    /// Name of the invoker function
    #[arg(long, value_name = "NAME")]
    pub invoke_function: Option<String>,

    /// Omit native comments
    #[arg(long)]
    pub no_comments: bool,

    /// Link every native to its documentation page
    #[arg(long)]
    pub links: bool,

    /// Substitute integer types for game handles
    #[arg(long)]
    pub native_types: bool,

    /// Keep raw native and parameter names
    #[arg(long)]
    pub no_enforce_naming: bool,

    /// Emit function bodies on their own line
    #[arg(long)]
    pub multi_line_functions: bool,

    /// Base URL of the natives documentation site
    #[arg(long, value_name = "URL")]
    pub origin: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Additional config file (overrides nativegen.toml)
    #[arg(long, env = "NATIVEGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
