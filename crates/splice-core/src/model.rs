//! Configuration model: replacement sets and per-file directives
//!
//! A run is configured by one YAML document:
//!
//! ```yaml
//! dialect: versioned
//! targets:
//!   services/vod/resource.go:
//!     regions:
//!       import: |
//!         svchttp "example.com/internal/http"
//!       setTag: ""
//!   internal/build.go:
//!     overwrite: |
//!       package build
//!   go.mod:
//!     append: |
//!       require example.com/sdk v1.2.0
//! ```
//!
//! The directive attached to each target decides the write strategy; nothing
//! is inferred from file names. Target order in the document is the order
//! files are processed in.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use splice_markers::{MarkerDialect, RegionMap};

use crate::error::{Error, Result};
use crate::path::TargetPath;

/// Configured action for one target file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileDirective {
    /// Rewrite marked regions against a key-to-text map.
    Regions(RegionMap),
    /// Replace the entire file content with the given string.
    Overwrite(String),
    /// Append the given string verbatim to the end of the file.
    Append(String),
}

impl FileDirective {
    /// Lowercase name of the directive kind, for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Regions(_) => "regions",
            Self::Overwrite(_) => "overwrite",
            Self::Append(_) => "append",
        }
    }
}

/// One (target path, directive) pair, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEntry {
    pub path: TargetPath,
    pub directive: FileDirective,
}

/// The full configuration for one run
///
/// Holds the marker dialect plus an ordered list of targets. Construct with
/// [`ReplacementSet::load`] or [`ReplacementSet::from_yaml`]; the set is
/// consumed by one engine run and carries no persistent state.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacementSet {
    dialect: MarkerDialect,
    entries: Vec<TargetEntry>,
}

impl ReplacementSet {
    /// Load and decode a configuration document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the file cannot be read or the
    /// document does not decode. Nothing else happens first: a bad
    /// configuration aborts before any target file is touched.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::config(path, e.to_string()))?;
        Self::from_yaml(&content).map_err(|e| Error::config(path, e.to_string()))
    }

    /// Decode a configuration document from YAML text.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// The marker dialect targets are scanned with.
    pub fn dialect(&self) -> MarkerDialect {
        self.dialect
    }

    /// Targets in document order.
    pub fn entries(&self) -> &[TargetEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReplacementSet {
    type Item = &'a TargetEntry;
    type IntoIter = std::slice::Iter<'a, TargetEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// YAML mappings decode through an explicit visitor so document order
// survives; a plain map type would lose it.
struct TargetMap(Vec<TargetEntry>);

// serde_yaml reads an externally tagged enum only from a `!tag` value; the
// nested single-key mapping form the document uses decodes through
// `singleton_map`.
#[derive(Deserialize)]
struct DirectiveValue(#[serde(with = "serde_yaml::with::singleton_map")] FileDirective);

impl<'de> Deserialize<'de> for TargetMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TargetMapVisitor;

        impl<'de> Visitor<'de> for TargetMapVisitor {
            type Value = TargetMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping from target path to directive")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                let mut seen: HashSet<TargetPath> = HashSet::new();
                while let Some((path, DirectiveValue(directive))) =
                    access.next_entry::<String, DirectiveValue>()?
                {
                    let path = TargetPath::new(&path);
                    if !seen.insert(path.clone()) {
                        return Err(de::Error::custom(format!(
                            "duplicate target path '{path}'"
                        )));
                    }
                    entries.push(TargetEntry { path, directive });
                }
                Ok(TargetMap(entries))
            }
        }

        deserializer.deserialize_map(TargetMapVisitor)
    }
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    dialect: MarkerDialect,
    targets: TargetMap,
}

impl<'de> Deserialize<'de> for ReplacementSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawDocument::deserialize(deserializer)?;
        Ok(Self {
            dialect: raw.dialect,
            entries: raw.targets.0,
        })
    }
}
