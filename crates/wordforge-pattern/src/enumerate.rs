// Lazy, length-bounded enumeration
//
// Each node kind has a cursor that pulls from the cursors of its children.
// A concat cursor holds one left word at a time and a fresh right cursor
// for it, so memory is bounded by tree depth rather than by output size.
//
// Every cursor carries a length cap: words longer than the cap cannot end
// up in any accepted output, given the length lower bounds of everything
// concatenated after them. Caps are only ever derived from those lower
// bounds, so skipping over-cap words never drops an accepted output.

use std::iter::FusedIterator;

use tracing::{debug, trace};
use wordforge_core::char_len;

use crate::node::{Pattern, PatternKind};
use crate::transform::{Mode, Transform};
use crate::{LengthRange, PatternError};

/// A produced word and its length in characters.
struct Word {
    text: String,
    len: usize,
}

impl Word {
    fn new(text: String) -> Self {
        let len = char_len(&text);
        Self { text, len }
    }
}

type Step = Option<Result<Word, PatternError>>;

enum Cursor {
    Leaf {
        pattern: Pattern,
        next: usize,
        cap: usize,
    },
    Concat(Box<ConcatCursor>),
    Union(Box<UnionCursor>),
    Transformed(Box<TransformCursor>),
}

struct ConcatCursor {
    left: Cursor,
    right_pattern: Pattern,
    cap: usize,
    /// The current left word and the right-side traversal paired with it.
    current: Option<(Word, Cursor)>,
}

struct UnionCursor {
    current: Cursor,
    /// Right operand, not yet started.
    pending: Option<Pattern>,
    cap: usize,
}

struct TransformCursor {
    source: Cursor,
    transform: Transform,
    mode: Mode,
    /// Transform outputs for the most recent source word, not yet yielded.
    outputs: std::vec::IntoIter<String>,
}

impl Cursor {
    fn new(pattern: &Pattern, cap: usize) -> Self {
        match pattern.kind() {
            PatternKind::Leaf(_) => Cursor::Leaf {
                pattern: pattern.clone(),
                next: 0,
                cap,
            },
            PatternKind::Concat(left, right) => Cursor::Concat(Box::new(ConcatCursor {
                left: Cursor::new(left, cap.saturating_sub(right.floor())),
                right_pattern: right.clone(),
                cap,
                current: None,
            })),
            PatternKind::Union(left, right) => Cursor::Union(Box::new(UnionCursor {
                current: Cursor::new(left, cap),
                pending: Some(right.clone()),
                cap,
            })),
            PatternKind::Transformed {
                source,
                transform,
                mode,
            } => Cursor::Transformed(Box::new(TransformCursor {
                source: Cursor::new(source, transform.length_rule().source_cap(*mode, cap)),
                transform: transform.clone(),
                mode: *mode,
                outputs: Vec::new().into_iter(),
            })),
        }
    }

    fn next(&mut self) -> Step {
        match self {
            Cursor::Leaf { pattern, next, cap } => {
                let items = pattern.items()?;
                while let Some(item) = items.get(*next) {
                    *next += 1;
                    let len = char_len(item);
                    if len <= *cap {
                        return Some(Ok(Word {
                            text: item.clone(),
                            len,
                        }));
                    }
                }
                None
            }
            Cursor::Concat(c) => c.next(),
            Cursor::Union(c) => c.next(),
            Cursor::Transformed(c) => c.next(),
        }
    }
}

impl ConcatCursor {
    fn next(&mut self) -> Step {
        loop {
            if let Some((prefix, right)) = self.current.as_mut() {
                match right.next() {
                    Some(Ok(suffix)) => {
                        let mut text = String::with_capacity(prefix.text.len() + suffix.text.len());
                        text.push_str(&prefix.text);
                        text.push_str(&suffix.text);
                        return Some(Ok(Word {
                            text,
                            len: prefix.len + suffix.len,
                        }));
                    }
                    Some(Err(e)) => return Some(Err(e)),
                    None => self.current = None,
                }
            }

            let prefix = match self.left.next()? {
                Ok(word) => word,
                Err(e) => return Some(Err(e)),
            };
            if prefix.len.saturating_add(self.right_pattern.floor()) > self.cap {
                trace!(prefix = %prefix.text, cap = self.cap, "prefix exceeds length cap");
                continue;
            }
            let right = Cursor::new(&self.right_pattern, self.cap - prefix.len);
            self.current = Some((prefix, right));
        }
    }
}

impl UnionCursor {
    fn next(&mut self) -> Step {
        loop {
            if let Some(step) = self.current.next() {
                return Some(step);
            }
            let right = self.pending.take()?;
            self.current = Cursor::new(&right, self.cap);
        }
    }
}

impl TransformCursor {
    fn next(&mut self) -> Step {
        if let Some(text) = self.outputs.next() {
            return Some(Ok(Word::new(text)));
        }
        loop {
            let word = match self.source.next()? {
                Ok(word) => word,
                Err(e) => return Some(Err(e)),
            };
            let outputs = match self.transform.apply(&word.text) {
                Ok(outputs) => outputs,
                Err(e) => return Some(Err(e)),
            };
            self.outputs = outputs.into_iter();
            match self.mode {
                Mode::Expand => return Some(Ok(word)),
                Mode::Alter => {
                    if let Some(text) = self.outputs.next() {
                        return Some(Ok(Word::new(text)));
                    }
                }
            }
        }
    }
}

/// Lazy iterator over the words of a pattern within a length range.
///
/// Items are `Err` only when a transform fails; the iterator then stops.
/// Dropping the iterator cancels the traversal.
pub struct Generator {
    root: Cursor,
    range: LengthRange,
    done: bool,
}

impl Generator {
    /// Start a fresh traversal of `pattern`.
    pub fn new(pattern: &Pattern, range: LengthRange) -> Self {
        debug!(min = range.min(), max = range.max(), floor = pattern.floor(), "starting enumeration");
        Self {
            root: Cursor::new(pattern, range.max()),
            range,
            done: false,
        }
    }

    pub fn range(&self) -> LengthRange {
        self.range
    }
}

impl Iterator for Generator {
    type Item = Result<String, PatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.root.next() {
                Some(Ok(word)) => {
                    if self.range.contains(word.len) {
                        return Some(Ok(word.text));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}

impl FusedIterator for Generator {}

/// Enumerate the words of `pattern` whose length lies in `[min_len, max_len]`.
///
/// Fails with `InvalidRange` before any traversal if `min_len > max_len`.
/// Every call starts a new traversal, so repeated calls yield identical
/// sequences.
pub fn generate(pattern: &Pattern, min_len: usize, max_len: usize) -> Result<Generator, PatternError> {
    let range = LengthRange::new(min_len, max_len)?;
    Ok(Generator::new(pattern, range))
}

impl Pattern {
    /// Enumerate the words of this pattern within `range`.
    pub fn words(&self, range: LengthRange) -> Generator {
        Generator::new(self, range)
    }
}
