//! Instrumented sources.

use std::cell::Cell;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Shared view of a [`CountingIter`]'s pull count, readable after the iterator
/// has been moved into an adapter.
#[derive(Clone, Debug, Default)]
pub struct PullCounter(Rc<Cell<usize>>);

impl PullCounter {
    /// Calls to `next` that produced an item.
    #[must_use]
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// Single-pass wrapper that counts how many items were pulled from `inner`.
///
/// It deliberately does not implement `Clone`, so a primitive that tried to
/// traverse its input twice would not compile against it.
#[derive(Debug)]
pub struct CountingIter<I> {
    inner: I,
    pulled: PullCounter,
    exhausted: Rc<Cell<bool>>,
}

impl<I: Iterator> CountingIter<I> {
    pub fn new(inner: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: inner.into_iter(),
            pulled: PullCounter::default(),
            exhausted: Rc::new(Cell::new(false)),
        }
    }

    /// Handle for reading the pull count later.
    #[must_use]
    pub fn counter(&self) -> PullCounter {
        self.pulled.clone()
    }

    /// Handle that turns `true` once `inner` has reported its end.
    #[must_use]
    pub fn exhausted(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.exhausted)
    }
}

impl<I: Iterator> Iterator for CountingIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match self.inner.next() {
            Some(item) => {
                self.pulled.0.set(self.pulled.0.get() + 1);
                Some(item)
            }
            None => {
                self.exhausted.set(true);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: FusedIterator> FusedIterator for CountingIter<I> {}
