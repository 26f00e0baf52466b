//! Binding code generation.
//!
//! A generator turns the natives of a [`NativeDatabase`] into source code for
//! one target language. Generators share the [`LineWriter`] for layout and
//! are driven namespace by namespace by [`generate`].

pub mod line_writer;
pub mod zig;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::database::NativeDatabase;
use crate::core::native::{DescriptorError, NativeDescriptor};

pub use line_writer::{LineEnding, LineWriter, WriterSettings};
pub use zig::{ZigGenerator, ZigSettings};

/// Error raised while emitting code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("branch closed without a matching open")]
    UnbalancedBranch,

    #[error("{depth} branch(es) left open at end of generation")]
    UnclosedBranches { depth: usize },

    #[error(transparent)]
    InvalidNative(#[from] DescriptorError),
}

/// Inputs of a run that come from the environment rather than the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    /// When the run happened
    pub generated_at: DateTime<Utc>,

    /// Base URL of the natives database the bindings were generated from
    pub origin: String,
}

impl GenerationContext {
    /// A trailing `/` on `origin` is dropped.
    pub fn new(generated_at: DateTime<Utc>, origin: impl Into<String>) -> Self {
        let mut origin = origin.into();
        origin.truncate(origin.trim_end_matches('/').len());

        GenerationContext {
            generated_at,
            origin,
        }
    }

    /// Context for a run happening now.
    pub fn now(origin: impl Into<String>) -> Self {
        Self::new(Utc::now(), origin)
    }

    /// Timestamp as printed in generated headers.
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    /// Link to the documentation page of a native.
    pub fn native_link(&self, hash: &str) -> String {
        format!("{}/natives/{}", self.origin, hash)
    }
}

/// A per-language binding generator.
///
/// Every `push_namespace` must be matched by exactly one `pop_namespace`.
pub trait CodeGenerator {
    /// Emit the document header.
    fn start(&mut self);

    /// Emit the document footer.
    fn end(&mut self);

    /// Open a namespace block.
    fn push_namespace(&mut self, name: &str);

    /// Close the innermost namespace block.
    fn pop_namespace(&mut self) -> Result<(), CodegenError>;

    /// Emit the binding for one native.
    fn add_native(&mut self, native: &NativeDescriptor) -> Result<(), CodegenError>;

    /// Consume the generator and return the generated document.
    fn finish(self) -> Result<String, CodegenError>
    where
        Self: Sized;
}

/// Run a generator over every namespace of a database.
pub fn generate<G: CodeGenerator>(
    mut generator: G,
    database: &NativeDatabase,
) -> Result<String, CodegenError> {
    generator.start();

    for (namespace, natives) in database.namespaces() {
        tracing::debug!("Generating {} ({} natives)", namespace, natives.len());

        generator.push_namespace(namespace);
        for native in natives {
            generator.add_native(native)?;
        }
        generator.pop_namespace()?;
    }

    generator.end();
    generator.finish()
}
