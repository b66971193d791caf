//! Unified diff rendering for previewing patches

use similar::TextDiff;

/// Unified diff between a target's current and patched content.
#[derive(Debug, Clone)]
pub struct FileDiff {
    /// Logical path of the target, as listed in the configuration.
    pub path: String,
    /// Unified diff text with `a/` and `b/` headers. Empty when unchanged.
    pub unified: String,
    pub changed: bool,
}

impl FileDiff {
    /// Diff `old` against `new` with three lines of context.
    pub fn between(path: impl Into<String>, old: &str, new: &str) -> Self {
        let path = path.into();
        let changed = old != new;
        let unified = if changed {
            let diff = TextDiff::from_lines(old, new);
            diff.unified_diff()
                .context_radius(3)
                .header(&format!("a/{path}"), &format!("b/{path}"))
                .to_string()
        } else {
            String::new()
        };
        Self {
            path,
            unified,
            changed,
        }
    }
}
