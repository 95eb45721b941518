//! String-level building blocks for the wordforge pattern engine.
//!
//! Every function here maps a single word to one or more words without
//! touching any pattern state, so the pattern crate can wrap them as
//! transforms and reason about how they change word length.
//!
//! # Modules
//!
//! - [`character`] -- Character classes and case-insensitive keys
//! - [`case`] -- Whole-word case conversions
//! - [`leet`] -- Lookalike character substitution tables
//! - [`shape`] -- Reversal, repetition and zero padding

pub mod case;
pub mod character;
pub mod leet;
pub mod shape;

/// Length of a word in characters (Unicode scalar values).
///
/// All length bounds in wordforge are expressed in this unit, never in bytes.
#[inline]
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}
