//! Core functionality for Refute property-based testing.
//!
//! This crate provides the fundamental building blocks for property-based
//! testing with Refute: candidate trees, generators, properties, and the
//! test runner with integrated shrinking.

pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod runner;
pub mod shrink;
pub mod tree;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use property::*;
pub use runner::*;
pub use tree::*;
