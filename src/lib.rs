//! nativegen - Zig binding generator for native-function databases
//!
//! This crate loads natives databases, maps their C-ABI signatures to Zig
//! and renders binding stubs that forward to a user-supplied invoker.

pub mod codegen;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and fixtures for nativegen unit tests.
#[cfg(test)]
pub mod test_support;

pub use codegen::{generate, CodeGenerator, GenerationContext, ZigGenerator, ZigSettings};
pub use core::{NativeDatabase, NativeDescriptor, NativeParam, TypeSpec};
pub use util::config::Config;
