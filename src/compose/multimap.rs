//! Apply an ordered chain of functions to every item.

use crate::error::{Error, Result};
use std::iter::FusedIterator;

/// Lazy adapter returned by [`multimap`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct MultiMap<I, F> {
    iter: I,
    functions: Vec<F>,
}

/// Apply `functions` in listed order to each item as it flows through.
///
/// Equivalent to `f_n(...f_1(item))` per item. An empty function list is the
/// identity transform. Heterogeneous closures can be passed as
/// `Box<dyn FnMut(T) -> T>`.
///
/// # Example
/// ```
/// let steps: Vec<Box<dyn FnMut(i32) -> i32>> = vec![Box::new(|x| x + 2), Box::new(|x| x * 10)];
/// let out: Vec<i32> = ironseq::multimap(steps, 0..3).collect();
/// assert_eq!(out, vec![20, 30, 40]);
/// ```
pub fn multimap<I, F, Fs>(functions: Fs, items: I) -> MultiMap<I::IntoIter, F>
where
    I: IntoIterator,
    Fs: IntoIterator<Item = F>,
    F: FnMut(I::Item) -> I::Item,
{
    MultiMap {
        iter: items.into_iter(),
        functions: functions.into_iter().collect(),
    }
}

impl<I, F> Iterator for MultiMap<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> I::Item,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.iter.next()?;
        Some(self.functions.iter_mut().fold(item, |acc, f| f(acc)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, F> FusedIterator for MultiMap<I, F>
where
    I: FusedIterator,
    F: FnMut(I::Item) -> I::Item,
{
}

/// Lazy adapter returned by [`try_multimap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TryMultiMap<I, F> {
    iter: I,
    functions: Vec<F>,
    failed: bool,
}

/// Fallible [`multimap`]: the first function error is yielded as
/// [`Error::Callback`] and ends the sequence.
pub fn try_multimap<I, F, Fs, E>(functions: Fs, items: I) -> TryMultiMap<I::IntoIter, F>
where
    I: IntoIterator,
    Fs: IntoIterator<Item = F>,
    F: FnMut(I::Item) -> std::result::Result<I::Item, E>,
    E: Into<anyhow::Error>,
{
    TryMultiMap {
        iter: items.into_iter(),
        functions: functions.into_iter().collect(),
        failed: false,
    }
}

impl<I, F, E> Iterator for TryMultiMap<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> std::result::Result<I::Item, E>,
    E: Into<anyhow::Error>,
{
    type Item = Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut acc = self.iter.next()?;
        for f in &mut self.functions {
            match f(acc) {
                Ok(v) => acc = v,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(Error::callback(e)));
                }
            }
        }
        Some(Ok(acc))
    }
}
