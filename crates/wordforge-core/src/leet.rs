// Lookalike ("leet") character substitution

use crate::character::simple_lower;

/// Basic substitutions: a→4, e→3, i→1, o→0, s→5.
pub const BASIC: &[(char, char)] = &[('a', '4'), ('e', '3'), ('i', '1'), ('o', '0'), ('s', '5')];

/// Primary advanced substitutions: [`BASIC`] plus t, b, g, z and l.
pub const ADVANCED: &[(char, char)] = &[
    ('a', '4'),
    ('e', '3'),
    ('i', '1'),
    ('o', '0'),
    ('s', '5'),
    ('t', '7'),
    ('b', '8'),
    ('g', '9'),
    ('z', '2'),
    ('l', '1'),
];

/// Symbol alternates used for the second advanced form.
///
/// Letters missing here fall back to their [`ADVANCED`] substitution.
pub const ALTERNATES: &[(char, char)] = &[
    ('a', '@'),
    ('s', '$'),
    ('i', '!'),
    ('l', '|'),
    ('t', '+'),
    ('g', '6'),
    ('h', '#'),
];

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    let key = simple_lower(c);
    table.iter().find(|(from, _)| *from == key).map(|(_, to)| *to)
}

/// Replace every character found in `table` (matched case-insensitively).
///
/// Characters without an entry are copied unchanged, so the result always
/// has the same character count as the input.
pub fn substitute(word: &str, table: &[(char, char)]) -> String {
    word.chars().map(|c| lookup(table, c).unwrap_or(c)).collect()
}

/// Apply the [`BASIC`] table.
pub fn leet_basic(word: &str) -> String {
    substitute(word, BASIC)
}

/// Produce the advanced forms of a word.
///
/// The first entry is the [`ADVANCED`] substitution. The second, present
/// only when it differs from the first, prefers [`ALTERNATES`] symbols.
pub fn leet_advanced(word: &str) -> Vec<String> {
    let primary = substitute(word, ADVANCED);
    let alternate: String = word
        .chars()
        .map(|c| {
            lookup(ALTERNATES, c)
                .or_else(|| lookup(ADVANCED, c))
                .unwrap_or(c)
        })
        .collect();
    if alternate == primary {
        vec![primary]
    } else {
        vec![primary, alternate]
    }
}
