//! Fixed-size batching.
//!
//! [`batch`] groups consecutive items into `Vec`s of exactly `size` items. The
//! last group holds whatever is left over (between `1` and `size - 1` items); it
//! is never padded and an empty input produces no groups at all.
//!
//! A group is assembled only when the consumer asks for it, so at most one
//! partially-filled group is alive at any time.

use crate::error::{ensure_arg, Result};
use std::iter::{Fuse, FusedIterator};

/// Lazy adapter returned by [`batch`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Batches<I> {
    iter: Fuse<I>,
    size: usize,
}

/// Group `items` into consecutive, non-overlapping batches of `size` items.
///
/// # Errors
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `size < 2`.
///
/// # Example
/// ```
/// let groups: Vec<Vec<u32>> = ironseq::batch(0..7, 3)?.collect();
/// assert_eq!(groups, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);
/// # Ok::<(), ironseq::Error>(())
/// ```
pub fn batch<I>(items: I, size: usize) -> Result<Batches<I::IntoIter>>
where
    I: IntoIterator,
{
    ensure_arg(size >= 2, "size", || {
        format!("batch size must be at least 2, got {size}")
    })?;
    Ok(Batches {
        iter: items.into_iter().fuse(),
        size,
    })
}

impl<I> Batches<I> {
    /// The configured group size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.iter.next()?;
        // `size` may far exceed what the source holds; grow past the hint on demand.
        let expected = self.iter.size_hint().0.saturating_add(1);
        let mut group = Vec::with_capacity(self.size.min(expected));
        group.push(first);
        group.extend(self.iter.by_ref().take(self.size - 1));
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        (lo.div_ceil(self.size), hi.map(|h| h.div_ceil(self.size)))
    }
}

impl<I: Iterator> FusedIterator for Batches<I> {}
