//! Method-chaining surface for the sequence primitives.
//!
//! - [`SeqExt`]: every primitive as an iterator method, so stages compose by
//!   chaining instead of nesting free-function calls.
//! - [`CompositeTransform`]: package several stages into a reusable, named
//!   component.
//!
//! # Example
//! ```
//! use ironseq::SeqExt;
//!
//! # fn main() -> ironseq::Result<()> {
//! let totals: Vec<usize> = (0..10)
//!     .batch(3)?
//!     .rolling_aggregate_from(|acc, group: Vec<u32>| acc + group.len(), 0)
//!     .collect();
//! assert_eq!(totals, vec![3, 6, 9, 10]);
//! # Ok(())
//! # }
//! ```

use crate::compose::{inner_join, multimap, try_multimap, InnerJoin, MultiMap, TryMultiMap};
use crate::error::Result;
use crate::flow::{sample, sample_seeded, throttle, time_limited, time_limited_with_delay};
use crate::flow::{Sample, Throttle, TimeLimited};
use crate::parallel::{parallelize_with, try_parallelize_with, ParallelConfig, Parallelize};
use crate::partition::{batch, peek, split, Batches, Continuation, Peeked, SplitSide};
use crate::stateful::{filter_with_state, rolling_aggregate, rolling_aggregate_from};
use crate::stateful::{FilterWithState, RollingAggregate, RollingAggregateFrom};
use crate::terminal::{exhaust, exhaust_count};
use std::hash::Hash;
use std::time::Duration;

/// Extension methods available on every [`Iterator`].
pub trait SeqExt: Iterator + Sized {
    /// See [`batch`](crate::batch).
    ///
    /// # Errors
    /// `InvalidArgument` if `size < 2`.
    fn batch(self, size: usize) -> Result<Batches<Self>> {
        batch(self, size)
    }

    /// See [`peek`](crate::peek).
    fn peek_ahead(self, n: usize) -> (Peeked<Self>, Continuation<Self>)
    where
        Self::Item: Clone,
    {
        peek(self, n)
    }

    /// See [`split`](crate::split). Returns `(matched, unmatched)`.
    fn split_by<P>(self, predicate: P) -> (SplitSide<Self, P>, SplitSide<Self, P>)
    where
        P: FnMut(&Self::Item) -> bool,
    {
        split(predicate, self)
    }

    /// See [`multimap`](crate::multimap).
    fn multimap<F, Fs>(self, functions: Fs) -> MultiMap<Self, F>
    where
        Fs: IntoIterator<Item = F>,
        F: FnMut(Self::Item) -> Self::Item,
    {
        multimap(functions, self)
    }

    /// See [`try_multimap`](crate::try_multimap).
    fn try_multimap<F, Fs, E>(self, functions: Fs) -> TryMultiMap<Self, F>
    where
        Fs: IntoIterator<Item = F>,
        F: FnMut(Self::Item) -> std::result::Result<Self::Item, E>,
        E: Into<anyhow::Error>,
    {
        try_multimap(functions, self)
    }

    /// See [`inner_join`](crate::inner_join); `self` is the streamed left side.
    fn inner_join<R, K, F, G>(
        self,
        right: R,
        key_left: F,
        key_right: G,
    ) -> InnerJoin<Self, K, R::Item, F>
    where
        R: IntoIterator,
        R::Item: Clone,
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
        G: FnMut(&R::Item) -> K,
    {
        inner_join(self, right, key_left, key_right)
    }

    /// See [`sample`](crate::sample).
    ///
    /// # Errors
    /// `InvalidArgument` if `rate` is outside `[0, 1]`.
    fn sample(self, rate: f64) -> Result<Sample<Self>> {
        sample(self, rate)
    }

    /// See [`sample_seeded`](crate::sample_seeded).
    ///
    /// # Errors
    /// `InvalidArgument` if `rate` is outside `[0, 1]`.
    fn sample_seeded(self, rate: f64, seed: u64) -> Result<Sample<Self>> {
        sample_seeded(self, rate, seed)
    }

    /// See [`throttle`](crate::throttle).
    ///
    /// # Errors
    /// `InvalidArgument` if `max_rate` is not positive.
    fn throttle(self, max_rate: f64) -> Result<Throttle<Self>> {
        throttle(self, max_rate)
    }

    /// See [`time_limited`](crate::time_limited).
    fn time_limited(self, max_duration: Duration) -> TimeLimited<Self> {
        time_limited(self, max_duration)
    }

    /// See [`time_limited_with_delay`](crate::time_limited_with_delay).
    fn time_limited_with_delay(self, max_duration: Duration, delay_per_item: Duration) -> TimeLimited<Self> {
        time_limited_with_delay(self, max_duration, delay_per_item)
    }

    /// See [`filter_with_state`](crate::filter_with_state).
    fn filter_with_state<P>(self, predicate: P) -> FilterWithState<Self, P>
    where
        Self::Item: Clone,
        P: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        filter_with_state(self, predicate)
    }

    /// See [`rolling_aggregate`](crate::rolling_aggregate).
    fn rolling_aggregate<F>(self, combine: F) -> RollingAggregate<Self, F>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        rolling_aggregate(self, combine)
    }

    /// See [`rolling_aggregate_from`](crate::rolling_aggregate_from).
    fn rolling_aggregate_from<A, F>(self, combine: F, initial: A) -> RollingAggregateFrom<Self, A, F>
    where
        A: Clone,
        F: FnMut(A, Self::Item) -> A,
    {
        rolling_aggregate_from(self, combine, initial)
    }

    /// See [`parallelize`](crate::parallelize).
    ///
    /// # Errors
    /// `Worker` if the pool cannot be created.
    fn parallelize<F, R>(self, function: F) -> Result<Parallelize<Self, R>>
    where
        Self::Item: Send + 'static,
        F: Fn(Self::Item) -> R + Send + Sync + 'static,
        R: Send + 'static,
    {
        parallelize_with(ParallelConfig::default(), function, self)
    }

    /// See [`try_parallelize_with`](crate::try_parallelize_with).
    ///
    /// # Errors
    /// `InvalidArgument` for a zero-sized config, `Worker` if the pool cannot be created.
    fn try_parallelize_with<F, R, E>(self, config: ParallelConfig, function: F) -> Result<Parallelize<Self, R>>
    where
        Self::Item: Send + 'static,
        F: Fn(Self::Item) -> std::result::Result<R, E> + Send + Sync + 'static,
        R: Send + 'static,
        E: Into<anyhow::Error>,
    {
        try_parallelize_with(config, function, self)
    }

    /// Run this sequence through a packaged [`CompositeTransform`].
    fn apply_composite<C>(self, transform: &C) -> C::Output
    where
        C: CompositeTransform<Self>,
    {
        transform.expand(self)
    }

    /// Count items flowing through this stage into `collector` under `name`.
    #[cfg(feature = "metrics")]
    fn metered(self, name: &str, collector: &crate::metrics::MetricsCollector) -> crate::metrics::Metered<Self> {
        crate::metrics::metered(self, name, collector)
    }

    /// See [`exhaust`](crate::exhaust).
    fn exhaust(self) {
        exhaust(self);
    }

    /// See [`exhaust_count`](crate::exhaust_count).
    fn exhaust_count(self) -> usize {
        exhaust_count(self)
    }
}

impl<I: Iterator> SeqExt for I {}

/// A reusable, packaged sequence of stages.
///
/// # Example
/// ```
/// use ironseq::{CompositeTransform, SeqExt};
///
/// struct Rising;
///
/// fn rises(previous: &i32, current: &i32) -> bool {
///     current > previous
/// }
///
/// impl<I: Iterator<Item = i32>> CompositeTransform<I> for Rising {
///     type Output = ironseq::FilterWithState<I, fn(&i32, &i32) -> bool>;
///
///     fn expand(&self, input: I) -> Self::Output {
///         input.filter_with_state(rises as fn(&i32, &i32) -> bool)
///     }
/// }
///
/// let out: Vec<i32> = vec![3, 1, 4, 1, 5].into_iter().apply_composite(&Rising).collect();
/// assert_eq!(out, vec![3, 4, 5]);
/// ```
pub trait CompositeTransform<I: Iterator> {
    /// The sequence produced by this transform.
    type Output: Iterator;

    /// Expand the transform over `input`.
    fn expand(&self, input: I) -> Self::Output;
}
