//! User-facing diagnostics for problems that are not hard errors, or that
//! deserve a hint on top of the error message.

use std::fmt;
use std::path::PathBuf;

use crate::util::config::ConfigError;

/// Hints attached to diagnostics.
pub mod suggestions {
    /// A namespace filter selected nothing.
    pub const UNKNOWN_NAMESPACE: &str =
        "Check the `--namespace` spelling; namespaces are matched case-insensitively";

    /// A configuration value was rejected.
    pub const INVALID_CONFIG: &str = "Run `nativegen config` to see the effective configuration";
}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// ANSI style for the label.
    fn style(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

/// A message plus the context needed to act on it.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Database or config file the message is about
    pub location: Option<PathBuf>,
    /// Extra facts, one per line
    pub notes: Vec<String>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            location: None,
            notes: Vec::new(),
            suggestion: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Warn that a namespace filter left nothing to generate.
    pub fn empty_selection(filter: &[String], available: &[String]) -> Self {
        let mut diag = Diagnostic::warning("no natives were generated");
        if filter.is_empty() {
            return diag;
        }

        diag = diag.with_note(format!("namespace filter: {}", filter.join(", ")));
        if !available.is_empty() {
            diag = diag.with_note(format!("available namespaces: {}", available.join(", ")));
        }
        diag.with_suggestion(suggestions::UNKNOWN_NAMESPACE)
    }

    /// Report a rejected configuration value.
    pub fn invalid_config(err: &ConfigError) -> Self {
        Diagnostic::error(err.to_string()).with_suggestion(suggestions::INVALID_CONFIG)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for a terminal, optionally with ANSI colors.
    pub fn format(&self, color: bool) -> String {
        let paint = |style: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", style, text)
            } else {
                text.to_string()
            }
        };

        let mut out = format!(
            "{}: {}\n",
            paint(self.severity.style(), self.severity.label()),
            self.message
        );

        if let Some(ref path) = self.location {
            out.push_str(&format!("  --> {}\n", path.display()));
        }
        for note in &self.notes {
            out.push_str(&format!("  = {}\n", note));
        }
        if let Some(ref suggestion) = self.suggestion {
            out.push_str(&format!("{}: {}\n", paint("1;32", "help"), suggestion));
        }

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
