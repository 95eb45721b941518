// Structural word transforms: reversal, repetition, zero padding

use crate::character::is_all_digits;

/// Reverse the character order.
pub fn reverse(word: &str) -> String {
    word.chars().rev().collect()
}

/// Concatenate the word with itself once.
pub fn repeat(word: &str) -> String {
    word.repeat(2)
}

/// Left-pad an all-digit word with zeros up to `width` characters.
///
/// Words containing anything other than ASCII digits, and the empty word,
/// are returned unchanged. Words already at least `width` long are never
/// truncated.
pub fn zero_pad(word: &str, width: usize) -> String {
    if !is_all_digits(word) || word.len() >= width {
        return word.to_string();
    }
    let mut out = "0".repeat(width - word.len());
    out.push_str(word);
    out
}
