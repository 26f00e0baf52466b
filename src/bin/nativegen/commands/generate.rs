//! `nativegen generate` command

use anyhow::Result;

use nativegen::ops::{generate_bindings, GenerateOptions};
use nativegen::util::config::Config;
use nativegen::util::diagnostic::{emit, Diagnostic};

use crate::cli::{GenerateArgs, OverrideArgs};
use crate::commands::effective_config;

pub fn execute(args: GenerateArgs, color: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;

    let mut config = effective_config(&cwd, args.config.as_deref())?;
    config.merge(overrides(&args.overrides));

    let mut opts = GenerateOptions::new(&cwd, args.inputs)
        .with_namespaces(args.namespaces.clone())
        .with_config(config);
    if let Some(output) = args.output {
        opts = opts.with_output(output);
    }

    let result = generate_bindings(&opts)?;

    if result.natives == 0 {
        let mut diag = Diagnostic::empty_selection(&args.namespaces, &result.available);
        if let Some(input) = result.inputs.first() {
            diag = diag.with_location(input);
        }
        emit(&diag, color);
    }

    tracing::debug!(
        "Read {} database(s), {} natives in {} namespaces",
        result.inputs.len(),
        result.natives,
        result.namespaces
    );

    if result.output.is_none() {
        print!("{}", result.source);
    }

    Ok(())
}

/// Turn command-line flags into a config layer. Unset flags leave the
/// lower layers untouched.
fn overrides(args: &OverrideArgs) -> Config {
    let mut config = Config::default();

    config.output.indent_width = args.indent;
    config.output.line_ending = args.line_ending;

    config.zig.invoke_function = args.invoke_function.clone();
    config.zig.generate_comments = args.no_comments.then_some(false);
    config.zig.include_links = args.links.then_some(true);
    config.zig.use_native_types = args.native_types.then_some(true);
    config.zig.enforce_naming = args.no_enforce_naming.then_some(false);
    config.zig.one_line_functions = args.multi_line_functions.then_some(false);

    config.links.origin = args.origin.clone();

    config
}
