//! Test utilities for nativegen unit tests.
//!
//! This module is only compiled for tests. It provides natives database
//! fixtures and helpers for building descriptors and generation contexts.

pub mod fixtures;

pub use fixtures::*;
