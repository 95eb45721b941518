// Length histograms and exact size estimation
//
// Histograms are computed bottom-up from the tree shape. Only transforms
// with an opaque length rule force a visit of their source words, and that
// visit is itself a lazy enumeration.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use tracing::debug;
use wordforge_core::char_len;

use crate::enumerate::Generator;
use crate::node::{Pattern, PatternKind};
use crate::transform::{LengthRule, Mode, Transform};
use crate::{LengthRange, PatternError};

/// Mapping from word length (in characters) to the number of words of that
/// length a pattern produces.
///
/// Multiplicity follows enumeration exactly: a word reachable through two
/// production paths is counted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthHistogram {
    buckets: BTreeMap<usize, u128>,
}

impl LengthHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` words of length `len`.
    pub fn add(&mut self, len: usize, count: u128) -> Result<(), PatternError> {
        if count == 0 {
            return Ok(());
        }
        let bucket = self.buckets.entry(len).or_insert(0);
        *bucket = bucket.checked_add(count).ok_or(PatternError::CountOverflow)?;
        Ok(())
    }

    /// Number of words of exactly `len` characters.
    pub fn get(&self, len: usize) -> u128 {
        self.buckets.get(&len).copied().unwrap_or(0)
    }

    /// Non-empty buckets in ascending length order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u128)> + '_ {
        self.buckets.iter().map(|(&len, &count)| (len, count))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn min_len(&self) -> Option<usize> {
        self.buckets.keys().next().copied()
    }

    pub fn max_len(&self) -> Option<usize> {
        self.buckets.keys().next_back().copied()
    }

    /// Total number of words.
    pub fn total(&self) -> Result<u128, PatternError> {
        self.buckets
            .values()
            .try_fold(0u128, |acc, &c| acc.checked_add(c))
            .ok_or(PatternError::CountOverflow)
    }

    /// Number of words whose length lies in `range`.
    pub fn count_in(&self, range: LengthRange) -> Result<u128, PatternError> {
        self.buckets
            .range(range.min()..=range.max())
            .try_fold(0u128, |acc, (_, &c)| acc.checked_add(c))
            .ok_or(PatternError::CountOverflow)
    }

    /// Bucket-wise sum.
    pub fn merge(&mut self, other: &LengthHistogram) -> Result<(), PatternError> {
        for (len, count) in other.iter() {
            self.add(len, count)?;
        }
        Ok(())
    }

    /// Discrete convolution: the histogram of every `a + b` concatenation.
    pub fn convolve(&self, other: &LengthHistogram) -> Result<LengthHistogram, PatternError> {
        let mut out = LengthHistogram::new();
        for (l1, c1) in self.iter() {
            for (l2, c2) in other.iter() {
                let len = l1.checked_add(l2).ok_or(PatternError::CountOverflow)?;
                let count = c1.checked_mul(c2).ok_or(PatternError::CountOverflow)?;
                out.add(len, count)?;
            }
        }
        Ok(out)
    }

    /// Apply a closed-form length rule to every bucket.
    ///
    /// Returns `None` for `LengthRule::Opaque`.
    fn map_lengths(&self, rule: LengthRule) -> Option<Result<LengthHistogram, PatternError>> {
        if rule == LengthRule::Opaque {
            return None;
        }
        let mut out = LengthHistogram::new();
        for (len, count) in self.iter() {
            let Some(mapped) = rule.map(len) else {
                return Some(Err(PatternError::CountOverflow));
            };
            if let Err(e) = out.add(mapped, count) {
                return Some(Err(e));
            }
        }
        Some(Ok(out))
    }
}

impl FromIterator<usize> for LengthHistogram {
    /// Build from word lengths, one word per item. Saturates rather than
    /// failing, which only matters past `u128::MAX` items.
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut hist = LengthHistogram::new();
        for len in iter {
            let bucket = hist.buckets.entry(len).or_insert(0);
            *bucket = bucket.saturating_add(1);
        }
        hist
    }
}

/// Memoizes histograms by node identity, so shared subtrees are computed once.
struct HistogramBuilder {
    memo: HashMap<usize, LengthHistogram>,
}

impl HistogramBuilder {
    fn new() -> Self {
        Self {
            memo: HashMap::new(),
        }
    }

    fn build(&mut self, pattern: &Pattern) -> Result<LengthHistogram, PatternError> {
        if let Some(hist) = self.memo.get(&pattern.node_id()) {
            return Ok(hist.clone());
        }
        let hist: LengthHistogram = match pattern.kind() {
            PatternKind::Leaf(items) => items.iter().map(|s| char_len(s)).collect(),
            PatternKind::Concat(left, right) => {
                let left = self.build(left)?;
                let right = self.build(right)?;
                left.convolve(&right)?
            }
            PatternKind::Union(left, right) => {
                let mut hist = self.build(left)?;
                hist.merge(&self.build(right)?)?;
                hist
            }
            PatternKind::Transformed {
                source,
                transform,
                mode,
            } => {
                let source_hist = self.build(source)?;
                let mut hist = match source_hist.map_lengths(transform.length_rule()) {
                    Some(mapped) => mapped?,
                    None => transformed_lengths(source, transform)?,
                };
                if *mode == Mode::Expand {
                    hist.merge(&source_hist)?;
                }
                hist
            }
        };
        self.memo.insert(pattern.node_id(), hist.clone());
        Ok(hist)
    }
}

/// Histogram of transform outputs, found by visiting each source word once.
fn transformed_lengths(
    source: &Pattern,
    transform: &Transform,
) -> Result<LengthHistogram, PatternError> {
    debug!(transform = transform.name(), "opaque length rule, visiting source words");
    let mut hist = LengthHistogram::new();
    for word in Generator::new(source, LengthRange::unbounded()) {
        for output in transform.apply(&word?)? {
            hist.add(char_len(&output), 1)?;
        }
    }
    Ok(hist)
}

/// Compute the length histogram of a pattern without generating its
/// words, except below transforms with an opaque length rule.
pub fn length_histogram(pattern: &Pattern) -> Result<LengthHistogram, PatternError> {
    HistogramBuilder::new().build(pattern)
}

/// Exact number of words `generate(pattern, min_len, max_len)` would yield.
pub fn estimate_size(pattern: &Pattern, min_len: usize, max_len: usize) -> Result<u128, PatternError> {
    let range = LengthRange::new(min_len, max_len)?;
    let hist = length_histogram(pattern)?;
    let size = hist.count_in(range)?;
    debug!(min = min_len, max = max_len, buckets = hist.buckets.len(), %size, "estimated keyspace");
    Ok(size)
}

/// Number of words the pattern produces with no length filter.
pub fn count(pattern: &Pattern) -> Result<u128, PatternError> {
    length_histogram(pattern)?.total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{EMPTY, alter, concat, expand, union};
    use crate::registry::Builtin;
    use crate::transform::TransformFailure;

    fn leaf(items: &[&str]) -> Pattern {
        Pattern::leaf(items.iter().copied()).unwrap()
    }

    fn buckets(hist: &LengthHistogram) -> Vec<(usize, u128)> {
        hist.iter().collect()
    }

    fn digits() -> Pattern {
        leaf(&["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"])
    }

    #[test]
    fn leaf_groups_by_length() {
        let hist = length_histogram(&leaf(&["a", "bb", "cc", "ddd", ""])).unwrap();
        assert_eq!(buckets(&hist), [(0, 1), (1, 1), (2, 2), (3, 1)]);
        assert_eq!(hist.min_len(), Some(0));
        assert_eq!(hist.max_len(), Some(3));
    }

    #[test]
    fn concat_convolves() {
        let p = concat(&leaf(&["a", "bb"]), &leaf(&["1", "22", "333"]));
        let hist = length_histogram(&p).unwrap();
        assert_eq!(buckets(&hist), [(2, 1), (3, 2), (4, 2), (5, 1)]);
        assert_eq!(hist.total().unwrap(), 6);
    }

    #[test]
    fn union_sums_without_dedup() {
        let p = union(&leaf(&["x", "yy"]), &leaf(&["yy"]));
        assert_eq!(buckets(&length_histogram(&p).unwrap()), [(1, 1), (2, 2)]);
    }

    #[test]
    fn closed_form_rules() {
        let source = leaf(&["ab", "cde"]);
        let reversed = expand(&source, &Builtin::Reverse.into());
        assert_eq!(buckets(&length_histogram(&reversed).unwrap()), [(2, 2), (3, 2)]);

        let doubled = alter(&source, &Builtin::Repeat.into());
        assert_eq!(buckets(&length_histogram(&doubled).unwrap()), [(4, 1), (6, 1)]);
    }

    #[test]
    fn opaque_rules_visit_source_words() {
        let p = expand(&leaf(&["5", "42", "abc"]), &Builtin::ZeroPad2.into());
        assert_eq!(buckets(&length_histogram(&p).unwrap()), [(1, 1), (2, 3), (3, 2)]);

        let p = alter(&leaf(&["test", "123"]), &Builtin::LeetAdvanced.into());
        assert_eq!(buckets(&length_histogram(&p).unwrap()), [(3, 1), (4, 2)]);
    }

    #[test]
    fn case_expansions_change_lengths() {
        let p = expand(&leaf(&["ab", "stra\u{00DF}e"]), &Builtin::Upper.into());
        assert_eq!(buckets(&length_histogram(&p).unwrap()), [(2, 2), (6, 1), (7, 1)]);
        assert_eq!(estimate_size(&p, 7, 7).unwrap(), 1);
    }

    #[test]
    fn estimate_scenario() {
        let p = concat(&leaf(&["a", "b"]), &leaf(&["1", "2"]));
        assert_eq!(estimate_size(&p, 2, 2).unwrap(), 4);
        assert_eq!(estimate_size(&p, 3, 10).unwrap(), 0);
        assert_eq!(count(&p).unwrap(), 4);
    }

    #[test]
    fn estimate_rejects_inverted_range() {
        assert!(matches!(
            estimate_size(&EMPTY, 3, 1),
            Err(PatternError::InvalidRange { .. })
        ));
    }

    #[test]
    fn infeasible_keyspace_counts_exactly() {
        let mut p = digits();
        for _ in 1..30 {
            p = concat(&p, &digits());
        }
        assert_eq!(count(&p).unwrap(), 10u128.pow(30));
        assert_eq!(estimate_size(&p, 0, 29).unwrap(), 0);
        assert_eq!(estimate_size(&p, 30, 30).unwrap(), 10u128.pow(30));
    }

    #[test]
    fn overflow_is_reported() {
        let mut p = digits();
        for _ in 1..40 {
            p = concat(&p, &p);
        }
        assert!(matches!(count(&p), Err(PatternError::CountOverflow)));
    }

    #[test]
    fn shared_subtrees_count_per_path() {
        let words = leaf(&["a", "b", "c"]);
        let pair = concat(&words, &words);
        let p = union(&pair, &concat(&pair, &words));
        assert_eq!(count(&p).unwrap(), 9 + 27);
    }

    #[test]
    fn opaque_failure_propagates() {
        let fails = Transform::new("fails", |_: &str| -> Result<Vec<String>, TransformFailure> {
            Err("no".into())
        });
        let p = alter(&leaf(&["a"]), &fails);
        assert!(matches!(count(&p), Err(PatternError::Transform { .. })));
    }

    #[test]
    fn histogram_from_lengths() {
        let hist: LengthHistogram = [3, 1, 3].into_iter().collect();
        assert_eq!(hist.get(3), 2);
        assert_eq!(hist.get(2), 0);
        assert_eq!(hist.count_in(LengthRange::new(2, 3).unwrap()).unwrap(), 2);
    }
}
