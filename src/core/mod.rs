//! Core data structures for nativegen.
//!
//! - Native descriptors and their C-ABI types
//! - Natives databases grouping descriptors by namespace

pub mod database;
pub mod native;

pub use database::{DatabaseError, NativeDatabase};
pub use native::{DescriptorError, NativeDescriptor, NativeParam, TypeSpec};
