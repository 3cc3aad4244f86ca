//! Two readers over one physical source.
//!
//! The source is pulled at most once per item. Pulled items stay in a shared
//! queue only while some live reader has yet to observe them; a reader that is
//! dropped, or that has reached its read limit, stops pinning the queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::iter::Fuse;
use std::rc::Rc;

#[derive(Clone, Copy, Debug)]
struct Cursor {
    position: usize,
    limit: Option<usize>,
    live: bool,
}

impl Cursor {
    const fn new(limit: Option<usize>) -> Self {
        Self {
            position: 0,
            limit,
            live: true,
        }
    }

    fn wants(&self, index: usize) -> bool {
        self.live && self.position <= index && self.limit.is_none_or(|l| index < l)
    }
}

struct TeeBuffer<I: Iterator> {
    source: Fuse<I>,
    // `queue[0]` is the item at absolute index `base`.
    queue: VecDeque<I::Item>,
    base: usize,
    pulled: usize,
    cursors: [Cursor; 2],
}

impl<I> TeeBuffer<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn next_for(&mut self, slot: usize) -> Option<I::Item> {
        let index = self.cursors[slot].position;
        if !self.cursors[slot].wants(index) {
            self.retire(slot);
            return None;
        }
        let other_wants = self.cursors[1 - slot].wants(index);

        let item = if index < self.base + self.queue.len() {
            if index == self.base && !other_wants {
                let item = self.queue.pop_front()?;
                self.base += 1;
                item
            } else {
                self.queue[index - self.base].clone()
            }
        } else {
            let item = self.source.next()?;
            self.pulled += 1;
            if other_wants {
                self.queue.push_back(item.clone());
            }
            item
        };

        self.cursors[slot].position += 1;
        self.trim();
        Some(item)
    }

    fn retire(&mut self, slot: usize) {
        self.cursors[slot].live = false;
        self.trim();
    }

    // Once the other reader stops wanting a fresh item it never wants a later
    // one, so items past the queue tail that were not queued are never needed.
    fn trim(&mut self) {
        while !self.queue.is_empty() && !self.cursors.iter().any(|c| c.wants(self.base)) {
            self.queue.pop_front();
            self.base += 1;
        }
        if self.queue.is_empty() {
            self.base = self.pulled;
        }
    }

    fn buffered(&self) -> usize {
        self.queue.len()
    }
}

/// One of the two readers handed out by [`tee`].
pub(crate) struct TeeReader<I>
where
    I: Iterator,
    I::Item: Clone,
{
    shared: Rc<RefCell<TeeBuffer<I>>>,
    slot: usize,
}

impl<I> TeeReader<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Items pulled from the source and still held for some reader.
    pub(crate) fn buffered(&self) -> usize {
        self.shared.borrow().buffered()
    }
}

impl<I> Iterator for TeeReader<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.shared.borrow_mut().next_for(self.slot)
    }
}

impl<I> Drop for TeeReader<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.retire(self.slot);
        }
    }
}

/// Split `source` into two readers. `limits[k]` caps how many items reader `k`
/// will ever observe (`None` = unbounded).
pub(crate) fn tee<I>(source: I, limits: [Option<usize>; 2]) -> (TeeReader<I>, TeeReader<I>)
where
    I: Iterator,
    I::Item: Clone,
{
    let shared = Rc::new(RefCell::new(TeeBuffer {
        source: source.fuse(),
        queue: VecDeque::new(),
        base: 0,
        pulled: 0,
        cursors: [Cursor::new(limits[0]), Cursor::new(limits[1])],
    }));
    (
        TeeReader {
            shared: Rc::clone(&shared),
            slot: 0,
        },
        TeeReader { shared, slot: 1 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn readers_see_every_item_once_each() {
        let (mut a, b) = tee(0..5, [None, None]);
        assert_eq!(a.next(), Some(0));
        assert_eq!(a.next(), Some(1));
        assert_eq!(b.collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(a.collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn source_is_pulled_once_per_item() {
        let pulls = Cell::new(0);
        let source = (0..4).inspect(|_| pulls.set(pulls.get() + 1));
        let (a, b) = tee(source, [None, None]);
        let left: Vec<_> = a.collect();
        let right: Vec<_> = b.collect();
        assert_eq!(left, right);
        assert_eq!(pulls.get(), 4);
    }

    #[test]
    fn dropped_reader_releases_queue() {
        let (mut a, b) = tee(0..100, [None, None]);
        for _ in 0..10 {
            a.next();
        }
        assert_eq!(a.buffered(), 10);
        drop(b);
        assert_eq!(a.buffered(), 0);
        assert_eq!(a.next(), Some(10));
        assert_eq!(a.buffered(), 0);
    }

    #[test]
    fn limited_reader_stops_pinning_past_its_limit() {
        let (limited, mut open) = tee(0..50, [Some(3), None]);
        for _ in 0..20 {
            open.next();
        }
        assert_eq!(open.buffered(), 3);
        assert_eq!(limited.collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(open.buffered(), 0);
    }
}
