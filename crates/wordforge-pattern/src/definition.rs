//! Declarative pattern definitions.
//!
//! A [`PatternDef`] is the serializable form of a pattern tree, so that
//! wordlist recipes can live in JSON files next to the item lists they
//! reference:
//!
//! ```json
//! {"concat": [
//!     {"expand": {"source": {"file": "names.txt"}, "transforms": ["CAPITALIZE"]}},
//!     {"union": [{"items": ["1", "123"]}, {"birthday": {"years": [1990], "formats": ["MMDD"]}}]},
//!     {"optional": {"items": ["!", "$"]}}
//! ]}
//! ```
//!
//! Transform names are resolved against a [`TransformRegistry`] and file
//! items through an [`ItemLoader`] when the definition is built.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::PatternError;
use crate::builders::{self, DateFormat};
use crate::node::{EMPTY, Pattern, alter, expand, optional};
use crate::registry::TransformRegistry;

/// Serializable description of a pattern tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDef {
    /// The single empty word.
    Empty,
    /// Literal alternatives.
    Items(Vec<String>),
    /// Alternatives read from a file, one per non-blank line.
    File(PathBuf),
    Concat(Vec<PatternDef>),
    Union(Vec<PatternDef>),
    /// The inner pattern or nothing.
    Optional(Box<PatternDef>),
    /// Transforms applied in sequence, each keeping the words it sees.
    Expand {
        source: Box<PatternDef>,
        transforms: Vec<String>,
    },
    /// Transforms applied in sequence, each replacing the words it sees.
    Alter {
        source: Box<PatternDef>,
        transforms: Vec<String>,
    },
    Repeat {
        pattern: Box<PatternDef>,
        times: usize,
    },
    Interleave {
        separator: String,
        patterns: Vec<PatternDef>,
    },
    Birthday {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        years: Option<Vec<i32>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        formats: Option<Vec<String>>,
    },
}

/// Source of items for [`PatternDef::File`] entries.
pub trait ItemLoader {
    fn load(&self, path: &Path) -> io::Result<Vec<String>>;
}

impl<F> ItemLoader for F
where
    F: Fn(&Path) -> io::Result<Vec<String>>,
{
    fn load(&self, path: &Path) -> io::Result<Vec<String>> {
        self(path)
    }
}

/// Loader for definitions that must not reference files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFiles;

impl ItemLoader for NoFiles {
    fn load(&self, path: &Path) -> io::Result<Vec<String>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("file items are not available here: {}", path.display()),
        ))
    }
}

/// Error type for parsing and building pattern definitions.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("failed to load items from {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid pattern definition: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PatternDef {
    pub fn from_json(text: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the pattern tree this definition describes.
    pub fn build(
        &self,
        registry: &TransformRegistry,
        loader: &dyn ItemLoader,
    ) -> Result<Pattern, DefinitionError> {
        let pattern = match self {
            PatternDef::Empty => EMPTY.clone(),
            PatternDef::Items(items) => Pattern::leaf(items.iter().cloned())?,
            PatternDef::File(path) => {
                let items = loader.load(path).map_err(|source| DefinitionError::Load {
                    path: path.clone(),
                    source,
                })?;
                Pattern::leaf(items)?
            }
            PatternDef::Concat(parts) => {
                let parts = Self::build_all(parts, registry, loader)?;
                builders::concat_all(&parts)?
            }
            PatternDef::Union(parts) => {
                let parts = Self::build_all(parts, registry, loader)?;
                builders::union_all(&parts)?
            }
            PatternDef::Optional(inner) => optional(&inner.build(registry, loader)?),
            PatternDef::Expand { source, transforms } => {
                let mut pattern = source.build(registry, loader)?;
                for name in transforms {
                    pattern = expand(&pattern, &registry.get(name)?);
                }
                pattern
            }
            PatternDef::Alter { source, transforms } => {
                let mut pattern = source.build(registry, loader)?;
                for name in transforms {
                    pattern = alter(&pattern, &registry.get(name)?);
                }
                pattern
            }
            PatternDef::Repeat { pattern, times } => {
                builders::repeat(&pattern.build(registry, loader)?, *times)
            }
            PatternDef::Interleave {
                separator,
                patterns,
            } => {
                let parts = Self::build_all(patterns, registry, loader)?;
                builders::interleave(separator, &parts)?
            }
            PatternDef::Birthday { years, formats } => {
                let formats = match formats {
                    Some(names) => names
                        .iter()
                        .map(|name| name.parse::<DateFormat>())
                        .collect::<Result<Vec<_>, _>>()?,
                    None => DateFormat::ALL.to_vec(),
                };
                match years {
                    Some(years) => builders::birthday(years.iter().copied(), &formats)?,
                    None => builders::birthday(builders::DEFAULT_YEARS, &formats)?,
                }
            }
        };
        Ok(pattern)
    }

    fn build_all(
        defs: &[PatternDef],
        registry: &TransformRegistry,
        loader: &dyn ItemLoader,
    ) -> Result<Vec<Pattern>, DefinitionError> {
        defs.iter().map(|d| d.build(registry, loader)).collect()
    }
}
