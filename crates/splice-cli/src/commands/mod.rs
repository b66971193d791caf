//! Command implementations for splice-cli

pub mod apply;
pub mod check;
pub mod completions;
pub mod diff;

pub use apply::run_apply;
pub use check::run_check;
pub use completions::run_completions;
pub use diff::run_diff;
