//! Refute property-based testing library.
//!
//! This is the main entry point for the Refute library, providing a
//! convenient API for property-based testing with integrated shrinking.

pub use refute_core::*;
