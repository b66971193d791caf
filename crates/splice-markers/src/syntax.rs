//! Marker syntax: comment styles, dialects, and token patterns
//!
//! A marker is a comment-embedded token. What the comment looks like depends
//! on the target file (`CommentStyle`), and the phrase inside the comment
//! depends on the configured `MarkerDialect`.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical phrase for versioned region markers.
pub const REPLACE_PHRASE: &str = "internal version: replace";

/// Canonical phrase for versioned single-line marks.
pub const LINE_MARK_PHRASE: &str = "yunti mark";

/// Comment conventions recognized in target files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// `//` line comments (Go, Rust, C family, JS, ...)
    Slash,
    /// `#` line comments (Python, shell, YAML, TOML, ...)
    Hash,
    /// `<!-- -->` block comments (HTML, Markdown, XML)
    Html,
}

impl CommentStyle {
    /// Select the comment style for a target file from its name.
    ///
    /// Matching is by extension, with a handful of well-known extensionless
    /// build files mapped to hash comments. Unknown extensions fall back to
    /// slash comments.
    pub fn for_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        match name {
            "Makefile" | "makefile" | "GNUmakefile" | "Dockerfile" => return Self::Hash,
            _ => {}
        }
        // Dotfiles without a further extension (.gitignore, .env, ...)
        if let Some(rest) = name.strip_prefix('.')
            && !rest.contains('.')
        {
            return Self::Hash;
        }
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("html" | "htm" | "xml" | "svg" | "md" | "markdown") => Self::Html,
            Some(
                "py" | "sh" | "bash" | "zsh" | "rb" | "yaml" | "yml" | "toml" | "tf" | "mk"
                | "cfg" | "ini" | "conf",
            ) => Self::Hash,
            _ => Self::Slash,
        }
    }

    /// The opening comment token.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Slash => "//",
            Self::Hash => "#",
            Self::Html => "<!--",
        }
    }

    /// The closing comment token, if the style has one.
    ///
    /// Line-comment styles return `None`; their marker tokens run to the end
    /// of the line instead.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Slash | Self::Hash => None,
            Self::Html => Some("-->"),
        }
    }
}

/// Marker phrase conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerDialect {
    /// The long phrase form: `internal version: replace KEY begin` paired
    /// with `... KEY end`, plus the single-line `yunti mark KEY` form.
    /// Tokens tolerate trailing prose after the keyword.
    #[default]
    Versioned,
    /// The compact form: `begin KEY` paired with `end KEY`. No single-line
    /// form, no trailing prose.
    Bare,
}

/// Compiled token patterns for one (style, dialect) combination
#[derive(Debug, Clone)]
pub struct MarkerSyntax {
    style: CommentStyle,
    dialect: MarkerDialect,
    tokens: Regex,
}

impl MarkerSyntax {
    /// Compile the token pattern for a comment style and dialect.
    pub fn new(style: CommentStyle, dialect: MarkerDialect) -> Self {
        let prefix = regex::escape(style.prefix());
        let pattern = match dialect {
            MarkerDialect::Versioned => {
                // Trailing prose up to end of line (or the closing comment
                // token) is part of the marker.
                let trailer = match style.suffix() {
                    Some(suffix) => format!("[^\n]*?{}", regex::escape(suffix)),
                    None => r"[^\n]*".to_string(),
                };
                format!(
                    r"(?m){p}\s*internal\s+version:\s*replace\s+(?P<bkey>\w+)\s+begin{t}|{p}\s*internal\s+version:\s*replace\s+(?P<ekey>\w+)\s+end{t}|{p}\s*yunti\s+mark\s+(?P<mkey>\w+){t}",
                    p = prefix,
                    t = trailer,
                )
            }
            MarkerDialect::Bare => {
                // The compact keywords are short enough to collide with
                // ordinary prose ("// end of loop"), so line-comment tokens
                // must close the line immediately after the key.
                let trailer = match style.suffix() {
                    Some(suffix) => format!("[^\n]*?{}", regex::escape(suffix)),
                    None => r"[ \t]*\r?$".to_string(),
                };
                format!(
                    r"(?m){p}\s*begin\s+(?P<bkey>\w+){t}|{p}\s*end\s+(?P<ekey>\w+){t}",
                    p = prefix,
                    t = trailer,
                )
            }
        };
        let tokens = Regex::new(&pattern).expect("marker token pattern must compile");
        Self {
            style,
            dialect,
            tokens,
        }
    }

    pub fn style(&self) -> CommentStyle {
        self.style
    }

    pub fn dialect(&self) -> MarkerDialect {
        self.dialect
    }

    pub(crate) fn token_pattern(&self) -> &Regex {
        &self.tokens
    }

    /// Render the canonical begin marker for a key.
    pub fn format_begin(&self, key: &str) -> String {
        match self.dialect {
            MarkerDialect::Versioned => self.wrap(&format!("{REPLACE_PHRASE} {key} begin")),
            MarkerDialect::Bare => self.wrap(&format!("begin {key}")),
        }
    }

    /// Render the canonical end marker for a key.
    pub fn format_end(&self, key: &str) -> String {
        match self.dialect {
            MarkerDialect::Versioned => self.wrap(&format!("{REPLACE_PHRASE} {key} end")),
            MarkerDialect::Bare => self.wrap(&format!("end {key}")),
        }
    }

    /// Render the canonical single-line mark for a key.
    ///
    /// Returns `None` for the bare dialect, which has no single-line form.
    pub fn format_mark(&self, key: &str) -> Option<String> {
        match self.dialect {
            MarkerDialect::Versioned => Some(self.wrap(&format!("{LINE_MARK_PHRASE} {key}"))),
            MarkerDialect::Bare => None,
        }
    }

    fn wrap(&self, phrase: &str) -> String {
        let prefix = self.style.prefix();
        match (self.style.suffix(), self.dialect) {
            (Some(suffix), MarkerDialect::Versioned) => format!("{prefix} {phrase} {suffix}"),
            (Some(suffix), MarkerDialect::Bare) => format!("{prefix}{phrase}{suffix}"),
            (None, _) => format!("{prefix} {phrase}"),
        }
    }
}
