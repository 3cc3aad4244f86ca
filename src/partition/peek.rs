//! Non-destructive look-ahead.
//!
//! [`peek`] hands back two readers over the same source:
//!
//! - [`Peeked`] yields (clones of) the first `n` items.
//! - [`Continuation`] yields *every* item, peeked ones included, in the original
//!   order.
//!
//! The two can be driven in any order, or interleaved. The physical source is
//! pulled once per item no matter how the readers are used; items are kept in
//! a shared queue only until both readers have seen them (or the peeked reader
//! has been dropped or has run out of its `n`).

use crate::partition::tee::{tee, TeeReader};
use std::fmt;
use std::iter::FusedIterator;

/// Finite preview over the first `n` items, returned by [`peek`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Peeked<I>
where
    I: Iterator,
    I::Item: Clone,
{
    reader: TeeReader<I>,
}

/// Full replay of the source, returned by [`peek`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Continuation<I>
where
    I: Iterator,
    I::Item: Clone,
{
    reader: TeeReader<I>,
}

/// Peek at the first `n` items of `items` without losing them.
///
/// Returns `(peeked, continuation)`. `peeked` yields `min(n, len)` items;
/// draining `continuation` yields all of `items` exactly once, in order,
/// whether or not `peeked` was driven first. A count of zero is valid and
/// yields an empty preview.
///
/// # Example
/// ```
/// let (head, all) = ironseq::peek(vec![1, 2, 3].into_iter(), 2);
/// assert_eq!(head.collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(all.collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
pub fn peek<I>(items: I, n: usize) -> (Peeked<I::IntoIter>, Continuation<I::IntoIter>)
where
    I: IntoIterator,
    I::Item: Clone,
{
    let (peeked, continuation) = tee(items.into_iter(), [Some(n), None]);
    (
        Peeked { reader: peeked },
        Continuation {
            reader: continuation,
        },
    )
}

/// Peek at the first item only.
pub fn peek_one<I>(items: I) -> (Peeked<I::IntoIter>, Continuation<I::IntoIter>)
where
    I: IntoIterator,
    I::Item: Clone,
{
    peek(items, 1)
}

impl<I> Iterator for Peeked<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.reader.next()
    }
}

impl<I> FusedIterator for Peeked<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

impl<I> Continuation<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Number of already-pulled items held back for either reader.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.reader.buffered()
    }
}

impl<I> Iterator for Continuation<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.reader.next()
    }
}

impl<I> FusedIterator for Continuation<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

impl<I> fmt::Debug for Peeked<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peeked").finish_non_exhaustive()
    }
}

impl<I> fmt::Debug for Continuation<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("buffered", &self.buffered())
            .finish_non_exhaustive()
    }
}
