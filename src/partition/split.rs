//! Predicate-driven partitioning into two lazy outputs.
//!
//! [`split`] returns a `(matched, unmatched)` pair. Each item pulled from the
//! source is classified exactly once and handed to the side it belongs to; if
//! that side is not the one currently pulling, the item waits in the side's
//! queue. The two outputs may be driven independently and out of lockstep.
//!
//! Items destined for an output that has already been dropped are discarded
//! instead of queued, so abandoning one side does not make the other leak.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::iter::{Fuse, FusedIterator};
use std::rc::Rc;

const MATCHED: usize = 0;
const UNMATCHED: usize = 1;

struct SplitState<I: Iterator, P> {
    source: Fuse<I>,
    predicate: P,
    queues: [VecDeque<I::Item>; 2],
    live: [bool; 2],
}

impl<I, P> SplitState<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    fn next_for(&mut self, side: usize) -> Option<I::Item> {
        if let Some(item) = self.queues[side].pop_front() {
            return Some(item);
        }
        loop {
            let item = self.source.next()?;
            let target = if (self.predicate)(&item) {
                MATCHED
            } else {
                UNMATCHED
            };
            if target == side {
                return Some(item);
            }
            if self.live[target] {
                self.queues[target].push_back(item);
            }
        }
    }
}

impl<I: Iterator, P> SplitState<I, P> {
    fn retire(&mut self, side: usize) {
        self.live[side] = false;
        self.queues[side].clear();
    }
}

/// One side of a [`split`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct SplitSide<I: Iterator, P> {
    shared: Rc<RefCell<SplitState<I, P>>>,
    side: usize,
}

/// Partition `items` by `predicate` into `(matched, unmatched)`.
///
/// Every item appears in exactly one output and each output preserves the
/// relative order of the source. The predicate runs once per item.
///
/// # Example
/// ```
/// let (even, odd) = ironseq::split(|x: &u32| x % 2 == 0, 0..6);
/// assert_eq!(odd.collect::<Vec<_>>(), vec![1, 3, 5]);
/// assert_eq!(even.collect::<Vec<_>>(), vec![0, 2, 4]);
/// ```
pub fn split<I, P>(predicate: P, items: I) -> (SplitSide<I::IntoIter, P>, SplitSide<I::IntoIter, P>)
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    let shared = Rc::new(RefCell::new(SplitState {
        source: items.into_iter().fuse(),
        predicate,
        queues: [VecDeque::new(), VecDeque::new()],
        live: [true, true],
    }));
    (
        SplitSide {
            shared: Rc::clone(&shared),
            side: MATCHED,
        },
        SplitSide {
            shared,
            side: UNMATCHED,
        },
    )
}

impl<I: Iterator, P> SplitSide<I, P> {
    /// `true` for the side receiving items the predicate accepted.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.side == MATCHED
    }

    /// Items already classified for this side and waiting to be pulled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.borrow().queues[self.side].len()
    }
}

impl<I, P> Iterator for SplitSide<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.shared.borrow_mut().next_for(self.side)
    }
}

impl<I, P> FusedIterator for SplitSide<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
}

impl<I: Iterator, P> Drop for SplitSide<I, P> {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.retire(self.side);
        }
    }
}

impl<I: Iterator, P> fmt::Debug for SplitSide<I, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitSide")
            .field("matched", &self.is_matched())
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
