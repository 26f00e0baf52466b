//! Natives database loading.
//!
//! A natives database is a JSON document grouping native descriptors by
//! namespace and keying each one by its hash:
//!
//! ```json
//! {
//!   "ENTITY": {
//!     "0x3FEF770D40960D5A": {
//!       "name": "GET_ENTITY_COORDS",
//!       "jhash": "0x1647F1CB",
//!       "comment": "Gets the current coordinates of an entity.",
//!       "params": [{ "type": "Entity", "name": "entity" }],
//!       "return_type": "Vector3",
//!       "build": "323"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use crate::core::native::{DescriptorError, NativeDescriptor, NativeParam, TypeSpec};

/// Error while reading a natives database.
#[derive(Debug, Error, Diagnostic)]
pub enum DatabaseError {
    #[error("failed to parse natives database `{name}`")]
    #[diagnostic(
        code(nativegen::database::syntax),
        help("natives databases map NAMESPACE -> hash -> native object")
    )]
    Syntax {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("invalid native `{hash}` in namespace `{namespace}`")]
    #[diagnostic(code(nativegen::database::invalid_native))]
    InvalidNative {
        namespace: String,
        hash: String,
        #[source]
        source: DescriptorError,
    },
}

#[derive(Debug, Deserialize)]
struct RawNative {
    name: String,
    #[serde(default)]
    jhash: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    params: Vec<NativeParam>,
    return_type: TypeSpec,
    #[serde(default)]
    build: Option<String>,
}

impl RawNative {
    fn into_descriptor(self, hash: String) -> NativeDescriptor {
        NativeDescriptor {
            name: self.name,
            hash,
            jhash: self.jhash,
            build: self.build.filter(|b| !b.is_empty()),
            return_type: self.return_type,
            params: self.params,
            comment: self.comment,
        }
    }
}

/// Native descriptors grouped by namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeDatabase {
    namespaces: BTreeMap<String, Vec<NativeDescriptor>>,
}

impl NativeDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        NativeDatabase::default()
    }

    /// Parse and validate a database from its JSON source.
    ///
    /// `name` identifies the source in diagnostics (usually the file path).
    pub fn from_json(name: &str, src: &str) -> Result<Self, DatabaseError> {
        let raw: BTreeMap<String, BTreeMap<String, RawNative>> = serde_json::from_str(src)
            .map_err(|e| DatabaseError::Syntax {
                name: name.to_string(),
                src: NamedSource::new(name, src.to_string()),
                span: error_span(src, e.line(), e.column()),
                message: e.to_string(),
            })?;

        let mut db = NativeDatabase::new();
        for (namespace, natives) in raw {
            for (hash, native) in natives {
                let native = native.into_descriptor(hash);
                native
                    .validate()
                    .map_err(|source| DatabaseError::InvalidNative {
                        namespace: namespace.clone(),
                        hash: native.hash.clone(),
                        source,
                    })?;
                db.insert(&namespace, native);
            }
        }
        db.sort();

        tracing::debug!(
            "Loaded {} natives in {} namespaces from {}",
            db.native_count(),
            db.namespace_count(),
            name
        );

        Ok(db)
    }

    /// Load a database from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read natives database: {}", path.display()))?;

        Ok(Self::from_json(&path.display().to_string(), &contents)?)
    }

    /// Add a native to a namespace, creating the namespace if needed.
    ///
    /// A native with the same hash in that namespace is replaced.
    pub fn insert(&mut self, namespace: &str, native: NativeDescriptor) {
        let natives = self.namespaces.entry(namespace.to_string()).or_default();

        match natives.iter_mut().find(|n| n.hash == native.hash) {
            Some(existing) => {
                tracing::debug!("Replacing {}::{} ({})", namespace, existing.name, native.hash);
                *existing = native;
            }
            None => natives.push(native),
        }
    }

    /// Merge another database into this one. Natives from `other` win on
    /// (namespace, hash) collisions.
    pub fn merge(&mut self, other: NativeDatabase) {
        for (namespace, natives) in other.namespaces {
            for native in natives {
                self.insert(&namespace, native);
            }
        }
        self.sort();
    }

    /// Keep only the given namespaces (case-insensitive). An empty filter keeps everything.
    pub fn retain_namespaces(&mut self, names: &[String]) {
        if names.is_empty() {
            return;
        }

        self.namespaces
            .retain(|namespace, _| names.iter().any(|n| n.eq_ignore_ascii_case(namespace)));
    }

    /// Iterate namespaces in order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &[NativeDescriptor])> {
        self.namespaces
            .iter()
            .map(|(name, natives)| (name.as_str(), natives.as_slice()))
    }

    /// Get the natives of one namespace.
    pub fn namespace(&self, name: &str) -> Option<&[NativeDescriptor]> {
        self.namespaces.get(name).map(Vec::as_slice)
    }

    /// Number of namespaces.
    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Total number of natives.
    pub fn native_count(&self) -> usize {
        self.namespaces.values().map(Vec::len).sum()
    }

    /// Check if the database has no natives.
    pub fn is_empty(&self) -> bool {
        self.native_count() == 0
    }

    fn sort(&mut self) {
        for natives in self.namespaces.values_mut() {
            natives.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.hash.cmp(&b.hash)));
        }
    }
}

/// Convert serde_json's 1-based line/column into a byte span.
fn error_span(src: &str, line: usize, column: usize) -> SourceSpan {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let offset = (line_start + column.saturating_sub(1)).min(src.len());
    let len = usize::from(offset < src.len());

    (offset, len).into()
}
