//! Round-robin merge of several sequences.

use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Lazy adapter returned by [`round_robin`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RoundRobin<I> {
    active: VecDeque<I>,
}

/// Take one item from each still-active input in listed order, round after
/// round, dropping an input permanently once it is exhausted.
///
/// Output order is round index first, input index second. No inputs yields an
/// empty sequence.
///
/// # Example
/// ```
/// let merged: Vec<u32> = ironseq::round_robin(vec![vec![1, 2], vec![3, 4, 5, 6], vec![7]]).collect();
/// assert_eq!(merged, vec![1, 3, 7, 2, 4, 5, 6]);
/// ```
pub fn round_robin<S, I>(sequences: S) -> RoundRobin<I::IntoIter>
where
    S: IntoIterator<Item = I>,
    I: IntoIterator,
{
    RoundRobin {
        active: sequences.into_iter().map(IntoIterator::into_iter).collect(),
    }
}

impl<I> RoundRobin<I> {
    /// Number of inputs that have not been seen to end yet.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.len()
    }
}

impl<I: Iterator> Iterator for RoundRobin<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let mut it = self.active.pop_front()?;
            if let Some(item) = it.next() {
                self.active.push_back(it);
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.active.iter().fold((0, Some(0)), |(lo, hi), it| {
            let (l, h) = it.size_hint();
            (
                lo.saturating_add(l),
                hi.and_then(|hi| h.and_then(|h| hi.checked_add(h))),
            )
        })
    }
}

impl<I: Iterator> FusedIterator for RoundRobin<I> {}
