// Whole-word case conversion
//
// Full Unicode mappings: a character may expand to several ('ß' -> "SS"),
// so none of these conversions preserve length in general.

use crate::character::is_whitespace;

/// Uppercase every character.
pub fn to_upper(word: &str) -> String {
    word.to_uppercase()
}

/// Lowercase every character.
pub fn to_lower(word: &str) -> String {
    word.to_lowercase()
}

/// Uppercase the first character and leave the rest untouched.
///
/// Unlike a "first upper, rest lower" conversion, `"mcDonald"` becomes
/// `"McDonald"`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
    }
}

/// Uppercase the first character of every whitespace-delimited word.
pub fn title(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_word_start = true;
    for c in word.chars() {
        if is_whitespace(c) {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
