//! Filesystem helpers for database discovery and output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write generated source, creating the parent directory first.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Expand database patterns relative to `base`.
///
/// Literal paths and globs are treated alike. The result is sorted and free
/// of duplicates so that merge order does not depend on argument order.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let full = base.join(pattern);
        let paths = glob::glob(&full.to_string_lossy())
            .with_context(|| format!("invalid glob pattern: {}", pattern))?;

        let before = files.len();
        for path in paths {
            match path {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping unreadable path: {}", e),
            }
        }

        if files.len() == before {
            tracing::warn!("Pattern `{}` matched no database", pattern);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out").join("natives.zig");

        write_string(&path, "// zig fmt: off\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "// zig fmt: off\n");
    }

    #[test]
    fn test_glob_files_sorted_and_deduped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("c.txt"), "").unwrap();

        let files = glob_files(tmp.path(), &["*.json".to_string(), "a.json".to_string()]).unwrap();
        assert_eq!(files, vec![tmp.path().join("a.json"), tmp.path().join("b.json")]);
    }

    #[test]
    fn test_glob_files_skips_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("dir.json")).unwrap();

        let files = glob_files(tmp.path(), &["*.json".to_string()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_glob_files_literal_missing() {
        let tmp = TempDir::new().unwrap();
        let files = glob_files(tmp.path(), &["missing.json".to_string()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_glob_files_invalid_pattern() {
        let tmp = TempDir::new().unwrap();
        assert!(glob_files(tmp.path(), &["[".to_string()]).is_err());
    }
}
