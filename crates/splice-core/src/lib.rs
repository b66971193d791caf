//! Patch orchestration for marker-based source trees
//!
//! This crate turns one YAML replacement set into writes against a target
//! tree, implementing:
//!
//! - **Configuration model**: Ordered target list with per-file directives
//! - **PatchEngine**: Apply, check, and diff operations over the tree
//! - **Atomic I/O**: Temp-sibling writes so a crash never truncates a target
//!
//! # Architecture
//!
//! `splice-core` sits between the marker scanner and the CLI:
//!
//! ```text
//!      splice-cli
//!          |
//!     splice-core
//!          |
//!    splice-markers
//! ```
//!
//! # Example
//!
//! ```no_run
//! use splice_core::{ApplyOptions, PatchEngine, ReplacementSet, Result};
//!
//! fn run() -> Result<()> {
//!     let set = ReplacementSet::load(std::path::Path::new("splice.yaml"))?;
//!     let engine = PatchEngine::new(".", set);
//!     let report = engine.apply(ApplyOptions::default())?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod check;
pub mod diff;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod path;

pub use check::{CheckFinding, CheckReport, CheckStatus, FindingKind};
pub use diff::FileDiff;
pub use engine::{ApplyOptions, ApplyReport, PatchEngine};
pub use error::{Error, Result};
pub use model::{FileDirective, ReplacementSet, TargetEntry};
pub use path::TargetPath;
