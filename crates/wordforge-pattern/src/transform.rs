// Transform capability, application modes and length rules

use std::fmt;
use std::sync::Arc;

use crate::PatternError;

/// Error returned by a failing transform function.
pub type TransformFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// How a transformed node combines source words with transform outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keep each source word, followed by its transformed variants.
    Expand,
    /// Replace each source word with its transformed variants.
    Alter,
}

/// What a transform does to word lengths, as far as it can be known
/// without looking at the words themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthRule {
    /// Exactly one output with the same length as the input.
    Preserve,
    /// Exactly one output whose length is the input length times `k`.
    Multiply(usize),
    /// Output count or lengths depend on content.
    Opaque,
}

impl LengthRule {
    /// Output length for an input of `len` characters, if statically known.
    pub fn map(self, len: usize) -> Option<usize> {
        match self {
            LengthRule::Preserve => Some(len),
            LengthRule::Multiply(k) => len.checked_mul(k),
            LengthRule::Opaque => None,
        }
    }

    /// Lower bound on output lengths, given a lower bound on input lengths.
    pub(crate) fn floor(self, mode: Mode, source_floor: usize) -> usize {
        match (self, mode) {
            (LengthRule::Opaque, _) => 0,
            (_, Mode::Expand) => source_floor.min(self.map(source_floor).unwrap_or(usize::MAX)),
            (_, Mode::Alter) => self.map(source_floor).unwrap_or(usize::MAX),
        }
    }

    /// Longest source word that can still contribute a word of at most
    /// `cap` characters.
    ///
    /// Opaque transforms may shorten words, so their source is never capped.
    pub(crate) fn source_cap(self, mode: Mode, cap: usize) -> usize {
        match (self, mode) {
            (LengthRule::Opaque, _) | (LengthRule::Multiply(0), _) => usize::MAX,
            (LengthRule::Preserve, _) | (LengthRule::Multiply(_), Mode::Expand) => cap,
            (LengthRule::Multiply(k), Mode::Alter) => cap / k,
        }
    }
}

/// A pure function from one word to an ordered sequence of words.
///
/// Any `Fn(&str) -> Result<Vec<String>, TransformFailure>` implements this
/// trait. Implementors that know how they change word length should
/// override [`TransformFn::length_rule`] so that size estimation can avoid
/// visiting every source word.
pub trait TransformFn: Send + Sync {
    fn apply(&self, input: &str) -> Result<Vec<String>, TransformFailure>;

    fn length_rule(&self) -> LengthRule {
        LengthRule::Opaque
    }
}

impl<F> TransformFn for F
where
    F: Fn(&str) -> Result<Vec<String>, TransformFailure> + Send + Sync,
{
    fn apply(&self, input: &str) -> Result<Vec<String>, TransformFailure> {
        self(input)
    }
}

/// Adapter for infallible one-to-one functions.
struct MapFn<F> {
    f: F,
    rule: LengthRule,
}

impl<F> TransformFn for MapFn<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn apply(&self, input: &str) -> Result<Vec<String>, TransformFailure> {
        Ok(vec![(self.f)(input)])
    }

    fn length_rule(&self) -> LengthRule {
        self.rule
    }
}

/// A named, shareable transform.
///
/// Cloning is cheap; the underlying function is reference counted.
#[derive(Clone)]
pub struct Transform {
    name: Arc<str>,
    op: Arc<dyn TransformFn>,
}

impl Transform {
    pub fn new(name: impl Into<Arc<str>>, op: impl TransformFn + 'static) -> Self {
        Self {
            name: name.into(),
            op: Arc::new(op),
        }
    }

    /// Wrap an infallible one-to-one function. Its length rule is `Opaque`.
    pub fn map<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(
            name,
            MapFn {
                f,
                rule: LengthRule::Opaque,
            },
        )
    }

    /// Like [`Transform::map`], with a caller-declared length rule.
    ///
    /// The rule must hold for every input; a wrong rule makes size
    /// estimates wrong and can make enumeration skip words.
    pub fn map_with_rule<F>(name: impl Into<Arc<str>>, rule: LengthRule, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(name, MapFn { f, rule })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length_rule(&self) -> LengthRule {
        self.op.length_rule()
    }

    /// Apply the transform, attributing any failure to this transform and input.
    pub fn apply(&self, input: &str) -> Result<Vec<String>, PatternError> {
        self.op
            .apply(input)
            .map_err(|source| PatternError::Transform {
                name: self.name.to_string(),
                input: input.to_string(),
                source,
            })
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .field("length_rule", &self.length_rule())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclaim(input: &str) -> Result<Vec<String>, TransformFailure> {
        Ok(vec![format!("{input}!"), format!("{input}!!")])
    }

    #[test]
    fn closures_are_transforms() {
        let t = Transform::new("exclaim", exclaim);
        assert_eq!(t.name(), "exclaim");
        assert_eq!(t.apply("hi").unwrap(), vec!["hi!", "hi!!"]);
        assert_eq!(t.length_rule(), LengthRule::Opaque);
    }

    #[test]
    fn map_wraps_single_output() {
        let t = Transform::map_with_rule("twice", LengthRule::Multiply(2), |s: &str| s.repeat(2));
        assert_eq!(t.apply("ab").unwrap(), vec!["abab"]);
        assert_eq!(t.length_rule(), LengthRule::Multiply(2));
    }

    #[test]
    fn failure_is_attributed() {
        let t = Transform::new("fails", |_: &str| -> Result<Vec<String>, TransformFailure> {
            Err("boom".into())
        });
        match t.apply("word") {
            Err(PatternError::Transform { name, input, source }) => {
                assert_eq!(name, "fails");
                assert_eq!(input, "word");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("expected transform error, got {other:?}"),
        }
    }

    #[test]
    fn rule_maps_lengths() {
        assert_eq!(LengthRule::Preserve.map(4), Some(4));
        assert_eq!(LengthRule::Multiply(3).map(4), Some(12));
        assert_eq!(LengthRule::Opaque.map(4), None);
        assert_eq!(LengthRule::Multiply(2).map(usize::MAX), None);
    }

    #[test]
    fn floors_and_caps() {
        assert_eq!(LengthRule::Multiply(2).floor(Mode::Alter, 3), 6);
        assert_eq!(LengthRule::Multiply(2).floor(Mode::Expand, 3), 3);
        assert_eq!(LengthRule::Opaque.floor(Mode::Alter, 3), 0);
        assert_eq!(LengthRule::Multiply(2).source_cap(Mode::Alter, 7), 3);
        assert_eq!(LengthRule::Multiply(2).source_cap(Mode::Expand, 7), 7);
        assert_eq!(LengthRule::Opaque.source_cap(Mode::Alter, 7), usize::MAX);
    }
}
