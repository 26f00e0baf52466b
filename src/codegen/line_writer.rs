//! Indented line writer shared by all generators.
//!
//! The writer tracks branch nesting and indentation. It knows nothing about
//! the target language: opening/closing delimiters and comment prefixes are
//! passed in by the generator at each call site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codegen::CodegenError;

/// Line ending style of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The line terminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "lf"),
            LineEnding::CrLf => write!(f, "crlf"),
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lf" | "unix" => Ok(LineEnding::Lf),
            "crlf" | "cr-lf" | "windows" => Ok(LineEnding::CrLf),
            _ => Err(format!(
                "invalid line ending '{}'; expected 'lf' or 'crlf'",
                s
            )),
        }
    }
}

/// Layout settings for a [`LineWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSettings {
    /// String emitted once per indentation level
    pub indentation: String,

    /// Line terminator used by [`LineWriter::finish`]
    pub line_ending: LineEnding,
}

impl Default for WriterSettings {
    fn default() -> Self {
        WriterSettings {
            indentation: "    ".to_string(),
            line_ending: LineEnding::Lf,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Branch {
    one_line: bool,
}

/// Accumulates generated lines with branch-aware indentation.
#[derive(Debug)]
pub struct LineWriter {
    settings: WriterSettings,
    lines: Vec<String>,
    branches: Vec<Branch>,
}

impl LineWriter {
    pub fn new(settings: WriterSettings) -> Self {
        LineWriter {
            settings,
            lines: Vec::new(),
            branches: Vec::new(),
        }
    }

    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    fn depth(&self) -> usize {
        self.branches.len()
    }

    fn in_one_line_branch(&self) -> bool {
        self.branches.last().is_some_and(|b| b.one_line)
    }

    fn indent(&self) -> String {
        self.settings.indentation.repeat(self.depth())
    }

    fn push_line(&mut self, text: &str) {
        let line = if text.trim().is_empty() {
            String::new()
        } else {
            format!("{}{}", self.indent(), text.trim_end())
        };
        self.lines.push(line);
    }

    /// Append to the current line, or start a new one if there is none.
    fn append(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some(last) if !last.is_empty() => {
                last.push(' ');
                last.push_str(text);
            }
            _ => self.push_line(text),
        }
    }

    /// Write one or more lines of text.
    pub fn write_line(&mut self, text: &str) {
        if text.is_empty() {
            self.write_blank_line();
            return;
        }

        for line in text.split('\n') {
            let line = line.trim_end_matches('\r');
            if self.in_one_line_branch() {
                self.append(line);
            } else {
                self.push_line(line);
            }
        }
    }

    pub fn write_blank_line(&mut self) {
        self.lines.push(String::new());
    }

    /// Write `text` as a comment, one `prefix`ed line per line of text.
    pub fn write_comment(&mut self, text: &str, prefix: &str) {
        for line in text.split('\n') {
            let line = line.trim_end_matches('\r');
            self.push_line(&format!("{} {}", prefix, line));
        }
    }

    /// Open a branch with `opening` at the end of the current line.
    ///
    /// Inside a one-line branch, following writes stay on the same line
    /// until the branch is popped.
    pub fn push_branch(&mut self, opening: &str, one_line: bool) {
        let one_line = one_line || self.in_one_line_branch();
        self.append(opening);
        self.branches.push(Branch { one_line });
    }

    /// Close the innermost branch with `closing`.
    pub fn pop_branch(&mut self, closing: &str) -> Result<(), CodegenError> {
        let branch = self.branches.pop().ok_or(CodegenError::UnbalancedBranch)?;

        if branch.one_line {
            self.append(closing);
        } else {
            self.push_line(closing);
        }

        Ok(())
    }

    /// Close the innermost branch and attach a trailing comment to the closing line.
    pub fn pop_branch_with_comment(
        &mut self,
        closing: &str,
        comment: &str,
        prefix: &str,
    ) -> Result<(), CodegenError> {
        self.pop_branch(closing)?;

        let comment = comment.trim();
        if !comment.is_empty() {
            self.append(&format!("{} {}", prefix, comment));
        }

        Ok(())
    }

    /// Join the written lines into the final document.
    pub fn finish(self) -> Result<String, CodegenError> {
        if !self.branches.is_empty() {
            return Err(CodegenError::UnclosedBranches {
                depth: self.branches.len(),
            });
        }

        let ending = self.settings.line_ending.as_str();
        let mut out = self.lines.join(ending);
        if !self.lines.is_empty() {
            out.push_str(ending);
        }

        Ok(out)
    }
}
