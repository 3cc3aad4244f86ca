//! Assertions over whole sequences.
//!
//! Every function here drains the sequence it is given and panics with both
//! sides printed on mismatch.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that `actual` yields exactly `expected`, in order.
///
/// # Panics
///
/// Panics at the first differing position, or if the lengths differ.
///
/// # Example
///
/// ```
/// use ironseq::testing::assert_yields;
///
/// assert_yields(ironseq::round_robin([vec![1, 2], vec![3]]), [1, 3, 2]);
/// ```
pub fn assert_yields<A, E, T>(actual: A, expected: E)
where
    A: IntoIterator<Item = T>,
    E: IntoIterator<Item = T>,
    T: Debug + PartialEq,
{
    let actual: Vec<T> = actual.into_iter().collect();
    let expected: Vec<T> = expected.into_iter().collect();
    if let Some(i) = actual.iter().zip(&expected).position(|(a, e)| a != e) {
        panic!(
            "Sequence mismatch at index {i}:\n  Expected: {:?}\n  Actual: {:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}",
            expected[i], actual[i]
        );
    }
    assert_eq!(
        actual.len(),
        expected.len(),
        "Sequence length mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

fn tally<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> HashMap<T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Assert that `actual` yields the same items as `expected`, with the same
/// multiplicities, in any order.
///
/// # Panics
///
/// Panics if any item is missing, extra, or repeated a different number of times.
///
/// # Example
///
/// ```
/// use ironseq::testing::assert_yields_unordered;
///
/// assert_yields_unordered(vec![3, 1, 2, 1], [1, 1, 2, 3]);
/// ```
pub fn assert_yields_unordered<A, E, T>(actual: A, expected: E)
where
    A: IntoIterator<Item = T>,
    E: IntoIterator<Item = T>,
    T: Debug + Eq + Hash,
{
    let actual = tally(actual);
    let expected = tally(expected);
    if actual != expected {
        let missing: Vec<_> = expected
            .iter()
            .filter(|(item, n)| actual.get(*item).is_none_or(|m| m < *n))
            .map(|(item, _)| item)
            .collect();
        let extra: Vec<_> = actual
            .iter()
            .filter(|(item, n)| expected.get(*item).is_none_or(|m| m < *n))
            .map(|(item, _)| item)
            .collect();
        panic!("Sequence content mismatch:\n  Missing or short: {missing:?}\n  Extra or repeated: {extra:?}");
    }
}

/// Assert that `matched` and `unmatched` partition `source`: every source item
/// lands on the side `predicate` picks, and each side keeps source order.
///
/// # Panics
///
/// Panics if either side differs from the filtered source.
///
/// # Example
///
/// ```
/// use ironseq::testing::assert_partitions;
///
/// let (even, odd) = ironseq::split(|x: &i32| x % 2 == 0, 0..6);
/// assert_partitions(even, odd, 0..6, |x| x % 2 == 0);
/// ```
pub fn assert_partitions<M, U, S, T, P>(matched: M, unmatched: U, source: S, mut predicate: P)
where
    M: IntoIterator<Item = T>,
    U: IntoIterator<Item = T>,
    S: IntoIterator<Item = T>,
    T: Debug + PartialEq,
    P: FnMut(&T) -> bool,
{
    let (want_matched, want_unmatched): (Vec<T>, Vec<T>) =
        source.into_iter().partition(|item| predicate(item));
    let matched: Vec<T> = matched.into_iter().collect();
    let unmatched: Vec<T> = unmatched.into_iter().collect();
    assert_eq!(matched, want_matched, "Matched side differs from filtered source");
    assert_eq!(unmatched, want_unmatched, "Unmatched side differs from filtered source");
}

/// Assert that every item satisfies `predicate`.
///
/// # Panics
///
/// Panics naming the first failing item and its index.
pub fn assert_all<I, P>(items: I, mut predicate: P)
where
    I: IntoIterator,
    I::Item: Debug,
    P: FnMut(&I::Item) -> bool,
{
    for (i, item) in items.into_iter().enumerate() {
        assert!(predicate(&item), "Item at index {i} failed predicate: {item:?}");
    }
}

/// Assert that no item satisfies `predicate`.
///
/// # Panics
///
/// Panics naming the first matching item and its index.
pub fn assert_none<I, P>(items: I, mut predicate: P)
where
    I: IntoIterator,
    I::Item: Debug,
    P: FnMut(&I::Item) -> bool,
{
    for (i, item) in items.into_iter().enumerate() {
        assert!(!predicate(&item), "Item at index {i} unexpectedly matched predicate: {item:?}");
    }
}
