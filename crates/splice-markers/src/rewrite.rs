//! Splicing replacement text into located regions and marked lines

use std::collections::BTreeMap;
use std::ops::Range;

use crate::error::Result;
use crate::scan::{self, LineMark, Region};
use crate::syntax::MarkerSyntax;

/// Replacement text keyed by region identifier.
pub type RegionMap = BTreeMap<String, String>;

/// Reserved line-mark key: the marked line is always deleted.
pub const MOVE_KEY: &str = "move";

/// Result of one rewrite pass over a text body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteOutcome {
    /// The fully rewritten text.
    pub text: String,
    /// Regions whose key was present in the map.
    pub regions_replaced: usize,
    /// Regions deleted because their key was absent.
    pub regions_removed: usize,
    /// Marked lines replaced by a mapped value.
    pub lines_replaced: usize,
    /// Marked lines deleted (`move`, absent key, or empty value).
    pub lines_removed: usize,
}

impl RewriteOutcome {
    /// Total number of spliced spans.
    pub fn total(&self) -> usize {
        self.regions_replaced + self.regions_removed + self.lines_replaced + self.lines_removed
    }
}

/// Rewrite a text body against a replacement map.
///
/// Every located region is spliced in one pass, in order of appearance:
/// a mapped key substitutes its value (markers removed, value may be empty),
/// an unmapped key deletes the whole span. Marked lines are replaced by a
/// mapped non-empty value and deleted otherwise, with [`MOVE_KEY`] always
/// deleting. Keys without a matching region or mark in
/// the text are ignored. Marker text re-introduced by a replacement value is
/// left verbatim rather than rescanned, which keeps the pass terminating and
/// the output stable under repeated rewrites with marker-free values.
///
/// # Errors
///
/// Propagates [`crate::Error::MalformedMarker`] from scanning; nothing is
/// spliced when pairing is broken.
pub fn rewrite(
    text: &str,
    syntax: &MarkerSyntax,
    replacements: &RegionMap,
) -> Result<RewriteOutcome> {
    let located = scan::scan(text, syntax)?;

    let mut outcome = RewriteOutcome::default();
    let mut plan: Vec<(Range<usize>, String)> =
        Vec::with_capacity(located.regions.len() + located.marks.len());

    for region in &located.regions {
        plan.push((
            region.span.clone(),
            region_replacement(region, replacements, &mut outcome),
        ));
    }
    for mark in &located.marks {
        plan.push((
            mark.span.clone(),
            line_replacement(mark, replacements, &mut outcome),
        ));
    }

    // Regions never nest and the scanner rejects marks sharing a line with
    // another token, so the located spans are disjoint; ordering by start
    // is enough to splice in one sweep.
    plan.sort_by_key(|(span, _)| span.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (span, replacement) in plan {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&replacement);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);

    outcome.text = out;
    Ok(outcome)
}

fn region_replacement(
    region: &Region,
    replacements: &RegionMap,
    outcome: &mut RewriteOutcome,
) -> String {
    match replacements.get(&region.key) {
        Some(value) => {
            outcome.regions_replaced += 1;
            value.clone()
        }
        None => {
            tracing::debug!(
                "deleting unmatched region '{}' (lines {}-{})",
                region.key,
                region.start_line,
                region.end_line
            );
            outcome.regions_removed += 1;
            String::new()
        }
    }
}

/// Line-mark semantics: `move` and unmapped keys delete the line, a mapped
/// non-empty value replaces it (keeping the line terminated), and a mapped
/// empty value deletes the line as well.
fn line_replacement(
    mark: &LineMark,
    replacements: &RegionMap,
    outcome: &mut RewriteOutcome,
) -> String {
    if mark.key == MOVE_KEY {
        outcome.lines_removed += 1;
        return String::new();
    }
    match replacements.get(&mark.key) {
        Some(value) if !value.is_empty() => {
            outcome.lines_replaced += 1;
            if mark.terminated && !value.ends_with('\n') {
                format!("{value}\n")
            } else {
                value.clone()
            }
        }
        Some(_) => {
            outcome.lines_removed += 1;
            String::new()
        }
        None => {
            tracing::debug!("deleting unmatched marked line '{}' (line {})", mark.key, mark.line);
            outcome.lines_removed += 1;
            String::new()
        }
    }
}
