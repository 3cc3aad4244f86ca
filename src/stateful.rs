//! Stateful transforms that carry one running value across items.
//!
//! State lives inside the adapter and is owned by the single traversal driving
//! it; building a new adapter starts from a clean slate.

use std::iter::FusedIterator;

/// Lazy adapter returned by [`filter_with_state`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct FilterWithState<I: Iterator, P> {
    iter: I,
    predicate: P,
    previous: Option<I::Item>,
}

/// Keep items by comparing each one with the item read just before it.
///
/// The first item is always kept. Every later item is kept iff
/// `predicate(previous, current)` holds, where `previous` is the last item
/// *read* from the input, whether or not it was kept.
///
/// # Example
/// ```
/// let rising: Vec<i32> = ironseq::filter_with_state(vec![1, 2, 1, 3, 2, 4], |p, c| c > p).collect();
/// assert_eq!(rising, vec![1, 2, 3, 4]);
/// ```
pub fn filter_with_state<I, P>(items: I, predicate: P) -> FilterWithState<I::IntoIter, P>
where
    I: IntoIterator,
    I::Item: Clone,
    P: FnMut(&I::Item, &I::Item) -> bool,
{
    FilterWithState {
        iter: items.into_iter(),
        predicate,
        previous: None,
    }
}

impl<I, P> Iterator for FilterWithState<I, P>
where
    I: Iterator,
    I::Item: Clone,
    P: FnMut(&I::Item, &I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.iter.next()?;
            let keep = match &self.previous {
                None => true,
                Some(previous) => (self.predicate)(previous, &item),
            };
            if keep {
                self.previous = Some(item.clone());
                return Some(item);
            }
            self.previous = Some(item);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, P> FusedIterator for FilterWithState<I, P>
where
    I: FusedIterator,
    I::Item: Clone,
    P: FnMut(&I::Item, &I::Item) -> bool,
{
}

/// Lazy adapter returned by [`rolling_aggregate`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RollingAggregate<I: Iterator, F> {
    iter: I,
    combine: F,
    acc: Option<I::Item>,
}

/// Running aggregate without a seed: the first output is the first item
/// verbatim, and each later output is `combine(previous_output, item)`.
///
/// # Example
/// ```
/// let sums: Vec<u32> = ironseq::rolling_aggregate(0..5, |a, b| a + b).collect();
/// assert_eq!(sums, vec![0, 1, 3, 6, 10]);
/// ```
pub fn rolling_aggregate<I, F>(items: I, combine: F) -> RollingAggregate<I::IntoIter, F>
where
    I: IntoIterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    RollingAggregate {
        iter: items.into_iter(),
        combine,
        acc: None,
    }
}

impl<I, F> Iterator for RollingAggregate<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.iter.next()?;
        let next = match self.acc.take() {
            None => item,
            Some(acc) => (self.combine)(acc, item),
        };
        self.acc = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, F> FusedIterator for RollingAggregate<I, F>
where
    I: FusedIterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
}

/// Lazy adapter returned by [`rolling_aggregate_from`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RollingAggregateFrom<I, A, F> {
    iter: I,
    combine: F,
    acc: Option<A>,
}

/// Running aggregate from an explicit seed: output `i` is
/// `combine(output_{i-1}, item_i)`, with `initial` standing in for `output_0`.
/// The accumulator type may differ from the item type.
///
/// # Example
/// ```
/// let lens: Vec<usize> =
///     ironseq::rolling_aggregate_from(vec!["ab", "c", "def"], |n, s: &str| n + s.len(), 0).collect();
/// assert_eq!(lens, vec![2, 3, 6]);
/// ```
pub fn rolling_aggregate_from<I, A, F>(
    items: I,
    combine: F,
    initial: A,
) -> RollingAggregateFrom<I::IntoIter, A, F>
where
    I: IntoIterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
    RollingAggregateFrom {
        iter: items.into_iter(),
        combine,
        acc: Some(initial),
    }
}

impl<I, A, F> Iterator for RollingAggregateFrom<I, A, F>
where
    I: Iterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
    type Item = A;

    fn next(&mut self) -> Option<A> {
        let item = self.iter.next()?;
        // `acc` is only vacated between `take` and the write-back below.
        let acc = self.acc.take()?;
        let next = (self.combine)(acc, item);
        self.acc = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, A, F> FusedIterator for RollingAggregateFrom<I, A, F>
where
    I: FusedIterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
}
