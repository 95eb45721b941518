//! Randomized property tests over small pattern trees.
//!
//! Every tree is checked against a reference that materializes the full
//! unfiltered word list, so length-based pruning in the enumerator and the
//! closed-form rules in the histogram are both held to the naive answer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wordforge_pattern::{
    Builtin, Pattern, PatternKind, Transform, alter, concat, estimate_size, expand, generate,
    length_histogram, union,
};

const ALPHABET: &[char] = &['a', 'B', '1', '7', ' ', 'e', 's', '\u{00DF}', '\u{FB01}'];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn random_word(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..=3);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn random_transform(rng: &mut StdRng) -> Transform {
    match rng.gen_range(0..12) {
        10 => Transform::map("drop_first", |s: &str| s.chars().skip(1).collect()),
        11 => Transform::map("pair", |s: &str| format!("{s}|{s}")),
        i => Builtin::ALL[i % Builtin::ALL.len()].into(),
    }
}

fn random_tree(rng: &mut StdRng, depth: usize, shared: &mut Vec<Pattern>) -> Pattern {
    if depth == 0 || rng.gen_range(0..4) == 0 {
        let count = rng.gen_range(1..=3);
        let words: Vec<String> = (0..count).map(|_| random_word(rng)).collect();
        let leaf = Pattern::leaf(words).unwrap();
        shared.push(leaf.clone());
        return leaf;
    }
    match rng.gen_range(0..6) {
        0 | 1 => {
            let l = random_tree(rng, depth - 1, shared);
            let r = random_tree(rng, depth - 1, shared);
            concat(&l, &r)
        }
        2 => {
            let l = random_tree(rng, depth - 1, shared);
            let r = random_tree(rng, depth - 1, shared);
            union(&l, &r)
        }
        3 => {
            let source = random_tree(rng, depth - 1, shared);
            expand(&source, &random_transform(rng))
        }
        4 => {
            let source = random_tree(rng, depth - 1, shared);
            alter(&source, &random_transform(rng))
        }
        _ => {
            // Reuse an earlier subtree to exercise shared nodes
            let pick = rng.gen_range(0..shared.len().max(1));
            match shared.get(pick).cloned() {
                Some(p) => concat(&p, &random_tree(rng, depth - 1, shared)),
                None => random_tree(rng, depth - 1, shared),
            }
        }
    }
}

/// Full, unfiltered word list built by brute force.
fn reference(pattern: &Pattern) -> Vec<String> {
    match pattern.kind() {
        PatternKind::Leaf(items) => items.clone(),
        PatternKind::Concat(l, r) => {
            let right = reference(r);
            reference(l)
                .iter()
                .flat_map(|a| right.iter().map(move |b| format!("{a}{b}")))
                .collect()
        }
        PatternKind::Union(l, r) => {
            let mut out = reference(l);
            out.extend(reference(r));
            out
        }
        PatternKind::Transformed {
            source,
            transform,
            mode,
        } => {
            let mut out = Vec::new();
            for word in reference(source) {
                let outputs = transform.apply(&word).unwrap();
                if *mode == wordforge_pattern::Mode::Expand {
                    out.push(word);
                }
                out.extend(outputs);
            }
            out
        }
    }
}

fn in_range(words: &[String], min: usize, max: usize) -> Vec<String> {
    words
        .iter()
        .filter(|w| (min..=max).contains(&w.chars().count()))
        .cloned()
        .collect()
}

fn enumerate(pattern: &Pattern, min: usize, max: usize) -> Vec<String> {
    generate(pattern, min, max)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn enumeration_matches_reference_in_every_window() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);
    for _ in 0..300 {
        let mut shared = Vec::new();
        let tree = random_tree(&mut rng, 3, &mut shared);
        let full = reference(&tree);
        for _ in 0..4 {
            let min = rng.gen_range(0..8);
            let max = min + rng.gen_range(0..8);
            assert_eq!(
                enumerate(&tree, min, max),
                in_range(&full, min, max),
                "tree {tree:?}, window {min}..={max}"
            );
        }
    }
}

#[test]
fn estimate_equals_filtered_enumeration() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0002);
    for _ in 0..300 {
        let mut shared = Vec::new();
        let tree = random_tree(&mut rng, 3, &mut shared);
        for _ in 0..4 {
            let min = rng.gen_range(0..8);
            let max = min + rng.gen_range(0..10);
            let enumerated = enumerate(&tree, min, max).len() as u128;
            assert_eq!(
                estimate_size(&tree, min, max).unwrap(),
                enumerated,
                "tree {tree:?}, window {min}..={max}"
            );
        }
    }
}

#[test]
fn histogram_buckets_match_reference_lengths() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0003);
    for _ in 0..200 {
        let mut shared = Vec::new();
        let tree = random_tree(&mut rng, 3, &mut shared);
        let hist = length_histogram(&tree).unwrap();
        let full = reference(&tree);
        for (len, count) in hist.iter() {
            let expected = full.iter().filter(|w| w.chars().count() == len).count() as u128;
            assert_eq!(count, expected, "tree {tree:?}, length {len}");
        }
        assert_eq!(hist.total().unwrap(), full.len() as u128);
    }
}

#[test]
fn concat_is_associative() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0004);
    for _ in 0..100 {
        let mut shared = Vec::new();
        let a = random_tree(&mut rng, 2, &mut shared);
        let b = random_tree(&mut rng, 2, &mut shared);
        let c = random_tree(&mut rng, 2, &mut shared);
        let left = concat(&concat(&a, &b), &c);
        let right = concat(&a, &concat(&b, &c));
        let max = rng.gen_range(0..12);
        assert_eq!(enumerate(&left, 0, max), enumerate(&right, 0, max));
    }
}

#[test]
fn concat_cardinality_is_product() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0005);
    for _ in 0..100 {
        let mut shared = Vec::new();
        let a = random_tree(&mut rng, 2, &mut shared);
        let b = random_tree(&mut rng, 2, &mut shared);
        let unbounded = |p: &Pattern| enumerate(p, 0, usize::MAX).len();
        assert_eq!(unbounded(&concat(&a, &b)), unbounded(&a) * unbounded(&b));
    }
}

#[test]
fn generation_is_restartable() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0006);
    for _ in 0..50 {
        let mut shared = Vec::new();
        let tree = random_tree(&mut rng, 3, &mut shared);
        assert_eq!(enumerate(&tree, 1, 6), enumerate(&tree, 1, 6));
    }
}
