//! Composable pattern trees for wordlist generation.
//!
//! A [`Pattern`] is an immutable expression tree built from literal word
//! sets with sequential (`concat`) and alternative (`union`) composition and
//! named transforms. The same tree can be enumerated lazily with
//! [`generate`] or sized exactly with [`estimate_size`], without any
//! conversion between the two.
//!
//! # Architecture
//!
//! - [`node`] -- Pattern nodes and the core combinators
//! - [`transform`] -- The transform capability, modes and length rules
//! - [`registry`] -- Built-in transform catalog and name lookup
//! - [`enumerate`] -- Lazy, length-bounded depth-first enumeration
//! - [`histogram`] -- Length histograms and exact size estimation
//! - [`builders`] -- N-ary, repetition, separator and date builders
//! - [`definition`] -- Declarative JSON pattern definitions (feature `definition`)

pub mod builders;
#[cfg(feature = "definition")]
pub mod definition;
pub mod enumerate;
pub mod histogram;
pub mod node;
pub mod registry;
pub mod transform;

use std::ops::RangeInclusive;

pub use enumerate::{Generator, generate};
pub use histogram::{LengthHistogram, count, estimate_size, length_histogram};
pub use node::{EMPTY, Pattern, PatternKind, alter, concat, expand, optional, union};
pub use registry::{Builtin, TransformRegistry};
pub use transform::{LengthRule, Mode, Transform, TransformFailure, TransformFn};

/// Error type for pattern construction, enumeration and sizing.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("invalid length range: min {min}, max {max}")]
    InvalidRange { min: i128, max: i128 },
    #[error("unknown transform: {0}")]
    UnknownTransform(String),
    #[error("transform {name} failed on {input:?}: {source}")]
    Transform {
        name: String,
        input: String,
        #[source]
        source: TransformFailure,
    },
    #[error("keyspace size does not fit in 128 bits")]
    CountOverflow,
}

/// An inclusive, validated range of word lengths in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LengthRange {
    min: usize,
    max: usize,
}

impl LengthRange {
    /// Create a range, failing with `InvalidRange` if `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self, PatternError> {
        if min > max {
            return Err(PatternError::InvalidRange {
                min: min as i128,
                max: max as i128,
            });
        }
        Ok(Self { min, max })
    }

    /// The range accepting every length.
    pub const fn unbounded() -> Self {
        Self {
            min: 0,
            max: usize::MAX,
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl TryFrom<(i64, i64)> for LengthRange {
    type Error = PatternError;

    /// Convert signed bounds, rejecting negatives as well as `min > max`.
    fn try_from((min, max): (i64, i64)) -> Result<Self, Self::Error> {
        let invalid = || PatternError::InvalidRange {
            min: i128::from(min),
            max: i128::from(max),
        };
        let lo = usize::try_from(min).map_err(|_| invalid())?;
        let hi = usize::try_from(max).map_err(|_| invalid())?;
        if lo > hi {
            return Err(invalid());
        }
        Ok(Self { min: lo, max: hi })
    }
}

impl From<LengthRange> for RangeInclusive<usize> {
    fn from(range: LengthRange) -> Self {
        range.min..=range.max
    }
}
