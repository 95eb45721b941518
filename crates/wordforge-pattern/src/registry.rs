// Built-in transform catalog and name-based lookup

use hashbrown::HashMap;
use wordforge_core::{case, leet, shape};

use crate::PatternError;
use crate::transform::{LengthRule, Transform, TransformFailure, TransformFn};

/// The built-in transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Upper,
    Lower,
    Capitalize,
    Title,
    Reverse,
    Repeat,
    LeetBasic,
    LeetAdvanced,
    ZeroPad2,
    ZeroPad4,
}

impl Builtin {
    pub const ALL: [Builtin; 10] = [
        Builtin::Upper,
        Builtin::Lower,
        Builtin::Capitalize,
        Builtin::Title,
        Builtin::Reverse,
        Builtin::Repeat,
        Builtin::LeetBasic,
        Builtin::LeetAdvanced,
        Builtin::ZeroPad2,
        Builtin::ZeroPad4,
    ];

    /// Catalog name, e.g. `"LEET_BASIC"`.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Upper => "UPPER",
            Builtin::Lower => "LOWER",
            Builtin::Capitalize => "CAPITALIZE",
            Builtin::Title => "TITLE",
            Builtin::Reverse => "REVERSE",
            Builtin::Repeat => "REPEAT",
            Builtin::LeetBasic => "LEET_BASIC",
            Builtin::LeetAdvanced => "LEET_ADVANCED",
            Builtin::ZeroPad2 => "ZERO_PAD_2",
            Builtin::ZeroPad4 => "ZERO_PAD_4",
        }
    }

    /// Look up a builtin by catalog name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Builtin> {
        let key = normalize(name);
        Self::ALL.into_iter().find(|b| b.name() == key)
    }

    /// Apply the transform. Built-ins never fail.
    pub fn run(self, word: &str) -> Vec<String> {
        match self {
            Builtin::Upper => vec![case::to_upper(word)],
            Builtin::Lower => vec![case::to_lower(word)],
            Builtin::Capitalize => vec![case::capitalize(word)],
            Builtin::Title => vec![case::title(word)],
            Builtin::Reverse => vec![shape::reverse(word)],
            Builtin::Repeat => vec![shape::repeat(word)],
            Builtin::LeetBasic => vec![leet::leet_basic(word)],
            Builtin::LeetAdvanced => leet::leet_advanced(word),
            Builtin::ZeroPad2 => vec![shape::zero_pad(word, 2)],
            Builtin::ZeroPad4 => vec![shape::zero_pad(word, 4)],
        }
    }
}

impl TransformFn for Builtin {
    fn apply(&self, input: &str) -> Result<Vec<String>, TransformFailure> {
        Ok(self.run(input))
    }

    fn length_rule(&self) -> LengthRule {
        match self {
            Builtin::Reverse | Builtin::LeetBasic => LengthRule::Preserve,
            Builtin::Repeat => LengthRule::Multiply(2),
            // Case mappings can expand a character ('ß' -> "SS").
            Builtin::Upper
            | Builtin::Lower
            | Builtin::Capitalize
            | Builtin::Title
            | Builtin::LeetAdvanced
            | Builtin::ZeroPad2
            | Builtin::ZeroPad4 => LengthRule::Opaque,
        }
    }
}

impl From<Builtin> for Transform {
    fn from(builtin: Builtin) -> Self {
        Transform::new(builtin.name(), builtin)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// A mapping from transform name to transform.
///
/// Names are matched ignoring surrounding whitespace and ASCII case.
/// [`TransformRegistry::default`] holds every [`Builtin`]; custom
/// transforms can be added with [`TransformRegistry::register`].
#[derive(Debug, Clone)]
pub struct TransformRegistry {
    entries: HashMap<String, Transform>,
}

impl TransformRegistry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A registry holding every built-in transform.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for builtin in Builtin::ALL {
            registry.register(builtin.into());
        }
        registry
    }

    /// Add a transform under its own name, returning any entry it replaced.
    pub fn register(&mut self, transform: Transform) -> Option<Transform> {
        self.entries.insert(normalize(transform.name()), transform)
    }

    /// Look up a transform, failing with `UnknownTransform`.
    pub fn get(&self, name: &str) -> Result<Transform, PatternError> {
        self.entries
            .get(&normalize(name))
            .cloned()
            .ok_or_else(|| PatternError::UnknownTransform(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str, word: &str) -> Vec<String> {
        TransformRegistry::default().get(name).unwrap().apply(word).unwrap()
    }

    #[test]
    fn catalog_semantics() {
        assert_eq!(run("UPPER", "hello"), ["HELLO"]);
        assert_eq!(run("LOWER", "HeLLo"), ["hello"]);
        assert_eq!(run("CAPITALIZE", "hello world"), ["Hello world"]);
        assert_eq!(run("TITLE", "hello world"), ["Hello World"]);
        assert_eq!(run("REVERSE", "web"), ["bew"]);
        assert_eq!(run("REPEAT", "ab"), ["abab"]);
        assert_eq!(run("LEET_BASIC", "password"), ["p455w0rd"]);
        assert_eq!(run("LEET_ADVANCED", "password"), ["p455w0rd", "p@$$w0rd"]);
    }

    #[test]
    fn case_transforms_use_full_mappings() {
        assert_eq!(run("UPPER", "stra\u{00DF}e"), ["STRASSE"]);
        assert_eq!(run("UPPER", "\u{FB01}re"), ["FIRE"]);
        assert_eq!(run("CAPITALIZE", "\u{00DF}e"), ["SSe"]);
        assert_eq!(run("TITLE", "\u{FB01}re \u{00DF}e"), ["FIre SSe"]);
        for builtin in [Builtin::Upper, Builtin::Lower, Builtin::Capitalize, Builtin::Title] {
            assert_eq!(builtin.length_rule(), LengthRule::Opaque, "{}", builtin.name());
        }
    }

    #[test]
    fn zero_pad_pass_through() {
        assert_eq!(run("ZERO_PAD_2", "5"), ["05"]);
        assert_eq!(run("ZERO_PAD_2", "abc"), ["abc"]);
        assert_eq!(run("ZERO_PAD_4", "42"), ["0042"]);
    }

    #[test]
    fn names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::from_name(" leet_basic "), Some(Builtin::LeetBasic));
        assert_eq!(Builtin::from_name("ROT13"), None);
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = TransformRegistry::default();
        assert_eq!(registry.len(), Builtin::ALL.len());
        assert!(registry.contains("upper"));
        assert_eq!(registry.get("Reverse").unwrap().name(), "REVERSE");
    }

    #[test]
    fn unknown_name_fails() {
        let err = TransformRegistry::default().get("ROT13").unwrap_err();
        assert!(matches!(err, PatternError::UnknownTransform(name) if name == "ROT13"));
    }

    #[test]
    fn custom_transforms_register_alongside_builtins() {
        let mut registry = TransformRegistry::builtin();
        let previous = registry.register(Transform::map("bang", |s: &str| format!("{s}!")));
        assert!(previous.is_none());
        assert_eq!(registry.get("BANG").unwrap().apply("hi").unwrap(), ["hi!"]);
        assert!(registry.names().contains(&"BANG"));
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = TransformRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.get("UPPER").is_err());
    }

    #[test]
    fn declared_length_rules_hold() {
        let words = ["", "a", "Hello World", "5", "2024", "caf\u{00E9}", "stra\u{00DF}e"];
        for builtin in Builtin::ALL {
            if builtin.length_rule() == LengthRule::Opaque {
                continue;
            }
            for word in words {
                let outputs = builtin.run(word);
                assert_eq!(outputs.len(), 1, "{} on {word:?}", builtin.name());
                let expected = builtin.length_rule().map(word.chars().count());
                assert_eq!(Some(outputs[0].chars().count()), expected, "{}", builtin.name());
            }
        }
    }
}
