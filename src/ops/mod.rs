//! High-level operations.
//!
//! This module contains the implementation of nativegen commands.

pub mod generate;

pub use generate::{generate_bindings, load_databases, GenerateOptions, GenerateResult};
