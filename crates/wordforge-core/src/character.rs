// Character classification and case-insensitive keys

/// Lowercase key for case-insensitive table lookups.
///
/// Only the first character of a multi-character lowercase expansion is
/// kept, so the key is always a single `char`. Not suitable for producing
/// output text; use `str::to_lowercase` for that.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Check whether a character separates words for title casing.
pub fn is_whitespace(c: char) -> bool {
    let cp = c as u32;
    (0x09..=0x0D).contains(&cp)
        || cp == 0x20
        || cp == 0x85
        || cp == 0xA0
        || cp == 0x1680
        || (0x2000..=0x200A).contains(&cp)
        || cp == 0x2028
        || cp == 0x2029
        || cp == 0x202F
        || cp == 0x205F
        || cp == 0x3000
}

/// Check whether a word is non-empty and made only of ASCII digits.
pub fn is_all_digits(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}
