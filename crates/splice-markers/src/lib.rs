//! Marker scanning and region splicing.
//!
//! Target files carry comment-embedded markers that delimit swappable
//! content. Two marker forms are recognized:
//!
//! Region pairs, which enclose a span to be substituted or deleted whole:
//!
//! ```text
//! // internal version: replace setTag begin
//! ...swappable content...
//! // internal version: replace setTag end
//! ```
//!
//! Single-line marks, where the marked line itself is the unit:
//!
//! ```text
//! # yunti mark requireSdk
//! ```
//!
//! The comment leader adapts to the target file ([`CommentStyle`]) and the
//! phrase inside the comment to the configured [`MarkerDialect`]; the bare
//! dialect uses compact `begin KEY` / `end KEY` comments instead of the
//! versioned phrase. [`scan`] locates markers and rejects broken pairings,
//! [`rewrite`] splices a [`RegionMap`] into the located spans.

pub mod error;
pub mod rewrite;
pub mod scan;
pub mod syntax;

pub use error::{Error, Result};
pub use rewrite::{MOVE_KEY, RegionMap, RewriteOutcome, rewrite};
pub use scan::{LineMark, MarkerKind, MarkerScan, MarkerToken, Region, scan, tokenize};
pub use syntax::{CommentStyle, MarkerDialect, MarkerSyntax};
