//! Tokenizing and pairing of markers
//!
//! Scanning happens in two stages. `tokenize` turns the text into a flat,
//! position-ordered sequence of marker tokens. `scan` then pairs those tokens
//! with a state machine, producing located regions and line marks and
//! rejecting broken pairings instead of guessing at spans.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::syntax::MarkerSyntax;

/// The three marker token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Opens a region
    Begin,
    /// Closes a region
    End,
    /// Stands alone on a single line
    Mark,
}

/// One marker token found in the text
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerToken {
    pub kind: MarkerKind,
    pub key: String,
    /// Byte span of the token itself, trailer included.
    pub span: Range<usize>,
    /// 1-based line of the token start.
    pub line: usize,
}

/// A located region: begin marker, body, end marker
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub key: String,
    /// Byte span covering both markers and everything between them.
    pub span: Range<usize>,
    pub start_line: usize,
    pub end_line: usize,
}

/// A located single-line mark
#[derive(Debug, Clone, PartialEq)]
pub struct LineMark {
    pub key: String,
    /// Byte span of the whole line, trailing newline included when present.
    pub span: Range<usize>,
    pub line: usize,
    /// False only when the line ends the text without a newline.
    pub terminated: bool,
}

/// Everything the scanner located in one text body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerScan {
    pub regions: Vec<Region>,
    pub marks: Vec<LineMark>,
}

impl MarkerScan {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && self.marks.is_empty()
    }

    /// All keys carried by located regions and marks, deduplicated and sorted.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.regions
            .iter()
            .map(|r| r.key.as_str())
            .chain(self.marks.iter().map(|m| m.key.as_str()))
            .collect()
    }
}

/// Find every marker token in the text, in order of appearance.
pub fn tokenize(text: &str, syntax: &MarkerSyntax) -> Vec<MarkerToken> {
    let mut tokens = Vec::new();
    for caps in syntax.token_pattern().captures_iter(text) {
        let (kind, key) = if let Some(key) = caps.name("bkey") {
            (MarkerKind::Begin, key)
        } else if let Some(key) = caps.name("ekey") {
            (MarkerKind::End, key)
        } else if let Some(key) = caps.name("mkey") {
            (MarkerKind::Mark, key)
        } else {
            continue;
        };
        let whole = caps.get(0).expect("capture 0 always present");
        tokens.push(MarkerToken {
            kind,
            key: key.as_str().to_string(),
            span: whole.start()..whole.end(),
            line: line_at(text, whole.start()),
        });
    }
    tokens
}

/// Tokenize and pair the text into regions and line marks.
///
/// # Errors
///
/// Returns [`Error::MalformedMarker`] when pairing is broken: a begin inside
/// an open region (nesting, regardless of key), an end whose key does not
/// match the open region, an end with no open region, a begin left open
/// at the end of the text, or a mark sharing its line with another marker.
pub fn scan(text: &str, syntax: &MarkerSyntax) -> Result<MarkerScan> {
    let mut regions = Vec::new();
    let mut marks = Vec::new();
    let mut open: Option<MarkerToken> = None;

    let mut tokens = tokenize(text, syntax).into_iter().peekable();
    let mut previous_line = 0;
    while let Some(token) = tokens.next() {
        let line = token.line;
        match token.kind {
            MarkerKind::Begin => {
                if let Some(previous) = &open {
                    return Err(Error::malformed(
                        token.line,
                        format!(
                            "begin '{}' while region '{}' from line {} is still open",
                            token.key, previous.key, previous.line
                        ),
                    ));
                }
                open = Some(token);
            }
            MarkerKind::End => match open.take() {
                Some(begin) if begin.key == token.key => {
                    regions.push(Region {
                        key: begin.key,
                        span: begin.span.start..token.span.end,
                        start_line: begin.line,
                        end_line: token.line,
                    });
                }
                Some(begin) => {
                    return Err(Error::malformed(
                        token.line,
                        format!(
                            "end '{}' does not close region '{}' opened at line {}",
                            token.key, begin.key, begin.line
                        ),
                    ));
                }
                None => {
                    return Err(Error::malformed(
                        token.line,
                        format!("end '{}' without a matching begin", token.key),
                    ));
                }
            },
            MarkerKind::Mark => {
                // A mark between begin and end is body text and gets spliced
                // away with the region.
                if open.is_none() {
                    // A located mark claims its whole line; another token on
                    // the same line would make the spans overlap.
                    if previous_line == line
                        || tokens.peek().is_some_and(|next| next.line == line)
                    {
                        return Err(Error::malformed(
                            line,
                            format!("mark '{}' shares its line with another marker", token.key),
                        ));
                    }
                    marks.push(expand_to_line(text, token));
                }
            }
        }
        previous_line = line;
    }

    if let Some(begin) = open {
        return Err(Error::malformed(
            begin.line,
            format!("begin '{}' is never closed", begin.key),
        ));
    }

    Ok(MarkerScan { regions, marks })
}

fn line_at(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos].iter().filter(|&&b| b == b'\n').count() + 1
}

fn expand_to_line(text: &str, token: MarkerToken) -> LineMark {
    let start = text[..token.span.start].rfind('\n').map_or(0, |i| i + 1);
    let (end, terminated) = match text[token.span.end..].find('\n') {
        Some(offset) => (token.span.end + offset + 1, true),
        None => (text.len(), false),
    };
    LineMark {
        key: token.key,
        span: start..end,
        line: token.line,
        terminated,
    }
}
