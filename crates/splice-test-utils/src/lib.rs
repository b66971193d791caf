//! Shared test utilities for the splice workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder plus marker fixture helpers

pub mod tree;

pub use tree::{TestTree, marked_line, marked_region};
