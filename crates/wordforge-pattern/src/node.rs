// Pattern nodes and combinators
//
// Nodes are immutable once built and held behind `Arc`, so a subtree can be
// shared by any number of parents and read from several threads at once.

use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::sync::{Arc, LazyLock};

use hashbrown::HashSet;
use wordforge_core::char_len;

use crate::PatternError;
use crate::registry::TransformRegistry;
use crate::transform::{Mode, Transform};

/// The shape of a pattern node.
#[derive(Debug)]
pub enum PatternKind {
    /// Literal alternatives, deduplicated, in first-occurrence order.
    Leaf(Vec<String>),
    /// Every word of the left side followed by every word of the right side.
    Concat(Pattern, Pattern),
    /// All words of the left side, then all words of the right side.
    Union(Pattern, Pattern),
    /// The words of `source` passed through `transform`.
    Transformed {
        source: Pattern,
        transform: Transform,
        mode: Mode,
    },
}

#[derive(Debug)]
struct Node {
    kind: PatternKind,
    /// Lower bound on the length of every word this node can produce.
    floor: usize,
}

/// A handle to an immutable pattern node.
///
/// Cloning copies the handle, not the tree.
#[derive(Clone)]
pub struct Pattern(Arc<Node>);

/// The pattern producing exactly one empty word.
///
/// Union with `EMPTY` makes a pattern optional:
/// `concat(&a, &union(&b, &EMPTY))` is "a, optionally followed by b".
pub static EMPTY: LazyLock<Pattern> = LazyLock::new(|| Pattern::literal(""));

impl Pattern {
    fn from_kind(kind: PatternKind) -> Self {
        let floor = match &kind {
            PatternKind::Leaf(items) => items.iter().map(|s| char_len(s)).min().unwrap_or(0),
            PatternKind::Concat(left, right) => left.floor().saturating_add(right.floor()),
            PatternKind::Union(left, right) => left.floor().min(right.floor()),
            PatternKind::Transformed {
                source,
                transform,
                mode,
            } => transform.length_rule().floor(*mode, source.floor()),
        };
        Self(Arc::new(Node { kind, floor }))
    }

    /// Build a leaf from literal alternatives.
    ///
    /// Duplicates are dropped, keeping the first occurrence. Fails with
    /// `InvalidPattern` when no items are given.
    pub fn leaf<I, S>(items: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for item in items {
            let item = item.into();
            if seen.insert(item.clone()) {
                unique.push(item);
            }
        }
        if unique.is_empty() {
            return Err(PatternError::InvalidPattern(
                "leaf must contain at least one item".to_string(),
            ));
        }
        Ok(Self::from_kind(PatternKind::Leaf(unique)))
    }

    /// A leaf holding a single word.
    pub fn literal(word: impl Into<String>) -> Self {
        Self::from_kind(PatternKind::Leaf(vec![word.into()]))
    }

    pub fn kind(&self) -> &PatternKind {
        &self.0.kind
    }

    /// The items of a leaf node, or `None` for composite nodes.
    pub fn items(&self) -> Option<&[String]> {
        match &self.0.kind {
            PatternKind::Leaf(items) => Some(items),
            _ => None,
        }
    }

    /// Lower bound on the length of every word this pattern produces.
    ///
    /// Exact for trees without opaque transforms; otherwise a safe
    /// underestimate.
    pub fn floor(&self) -> usize {
        self.0.floor
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Pattern) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the underlying node, stable for the node's lifetime.
    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub fn concat(&self, other: &Pattern) -> Pattern {
        concat(self, other)
    }

    pub fn union(&self, other: &Pattern) -> Pattern {
        union(self, other)
    }

    pub fn optional(&self) -> Pattern {
        optional(self)
    }

    pub fn expand(&self, transform: &Transform) -> Pattern {
        expand(self, transform)
    }

    pub fn alter(&self, transform: &Transform) -> Pattern {
        alter(self, transform)
    }

    /// Expand with a transform looked up by name.
    pub fn expand_named(
        &self,
        registry: &TransformRegistry,
        name: &str,
    ) -> Result<Pattern, PatternError> {
        Ok(expand(self, &registry.get(name)?))
    }

    /// Alter with a transform looked up by name.
    pub fn alter_named(
        &self,
        registry: &TransformRegistry,
        name: &str,
    ) -> Result<Pattern, PatternError> {
        Ok(alter(self, &registry.get(name)?))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            PatternKind::Leaf(items) => f.debug_tuple("Leaf").field(items).finish(),
            PatternKind::Concat(l, r) => f.debug_tuple("Concat").field(l).field(r).finish(),
            PatternKind::Union(l, r) => f.debug_tuple("Union").field(l).field(r).finish(),
            PatternKind::Transformed {
                source,
                transform,
                mode,
            } => f
                .debug_struct("Transformed")
                .field("source", source)
                .field("transform", &transform.name())
                .field("mode", mode)
                .finish(),
        }
    }
}

/// Sequential composition: every word of `a` followed by every word of `b`.
pub fn concat(a: &Pattern, b: &Pattern) -> Pattern {
    Pattern::from_kind(PatternKind::Concat(a.clone(), b.clone()))
}

/// Alternative composition: the words of `a`, then the words of `b`.
///
/// Words produced by both sides are kept twice.
pub fn union(a: &Pattern, b: &Pattern) -> Pattern {
    Pattern::from_kind(PatternKind::Union(a.clone(), b.clone()))
}

/// `union(p, EMPTY)`.
pub fn optional(p: &Pattern) -> Pattern {
    union(p, &EMPTY)
}

/// Keep every word and add its transformed variants right after it.
pub fn expand(source: &Pattern, transform: &Transform) -> Pattern {
    Pattern::from_kind(PatternKind::Transformed {
        source: source.clone(),
        transform: transform.clone(),
        mode: Mode::Expand,
    })
}

/// Replace every word with its transformed variants.
pub fn alter(source: &Pattern, transform: &Transform) -> Pattern {
    Pattern::from_kind(PatternKind::Transformed {
        source: source.clone(),
        transform: transform.clone(),
        mode: Mode::Alter,
    })
}

impl BitAnd for &Pattern {
    type Output = Pattern;

    fn bitand(self, rhs: &Pattern) -> Pattern {
        concat(self, rhs)
    }
}

impl BitAnd for Pattern {
    type Output = Pattern;

    fn bitand(self, rhs: Pattern) -> Pattern {
        concat(&self, &rhs)
    }
}

impl BitOr for &Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: &Pattern) -> Pattern {
        union(self, rhs)
    }
}

impl BitOr for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: Pattern) -> Pattern {
        union(&self, &rhs)
    }
}
