//! # Ironseq
//!
//! **Lazy, single-pass sequence primitives** for stream-style data processing.
//! Every primitive consumes any [`IntoIterator`] and hands back an ordinary
//! iterator, so stages compose freely with each other and with the standard
//! library's adapters.
//!
//! ## Key Features
//!
//! - **Partitioning** - fixed-size [`batch`]es, non-destructive [`peek`], one-pass [`split`]
//! - **Composition** - function chains ([`multimap`]), [`round_robin`] merge, hash [`inner_join`]
//! - **Flow control** - [`throttle`], [`time_limited`], Bernoulli [`sample`]
//! - **Stateful transforms** - [`filter_with_state`], [`rolling_aggregate`]
//! - **Parallel map** - [`parallelize`] on a bounded worker pool, unordered results
//! - **Services** - disk [`cache`](crate::cache), regex-keyed [`patterns`](crate::patterns),
//!   item [`metrics`](crate::metrics) (each behind a default feature)
//!
//! ## Core Concepts
//!
//! ### Laziness and single traversal
//!
//! Nothing is pulled from a source until the returned iterator is driven, and
//! no primitive traverses its input twice. Sources may be one-shot, e.g. a
//! network stream or a [`CountingIter`](crate::testing::CountingIter).
//!
//! ### Two readers, one source
//!
//! [`peek`] and [`split`] return two iterators over one source. They share a
//! private buffer holding only the items one reader has seen and the other has
//! not, and may be driven in any interleaving. Both readers are
//! single-threaded (`!Send`).
//!
//! ### Errors
//!
//! Bad arguments are rejected when an adapter is built, before any item is
//! pulled. Failing callbacks go through the `try_` variants, whose items are
//! [`Result`]s. See [`Error`].
//!
//! ## Quick Start
//!
//! ```
//! use ironseq::SeqExt;
//!
//! # fn main() -> ironseq::Result<()> {
//! let readings = vec![3, 5, 4, 8, 9, 2, 10, 12];
//!
//! // Keep rising readings, then sum them in groups of two.
//! let sums: Vec<i32> = readings
//!     .into_iter()
//!     .filter_with_state(|previous, current| current > previous)
//!     .batch(2)?
//!     .map(|group| group.iter().sum::<i32>())
//!     .collect();
//! assert_eq!(sums, vec![8, 17, 22]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`partition`] - `batch`, `peek`, `split`
//! - [`compose`] - `multimap`, `round_robin`, `inner_join`
//! - [`flow`] - `throttle`, `time_limited`, `sample`
//! - [`stateful`] - `filter_with_state`, `rolling_aggregate`
//! - [`parallel`] - `parallelize` and its worker pool configuration
//! - [`terminal`] - `exhaust`
//! - [`extensions`] - the [`SeqExt`] method surface and [`CompositeTransform`]
//! - [`testing`] - assertions and instrumented sources for tests

pub mod compose;
pub mod error;
pub mod extensions;
pub mod flow;
pub mod parallel;
pub mod partition;
pub mod stateful;
pub mod terminal;
pub mod testing;

#[cfg(feature = "cache")]
pub mod cache;
#[cfg(feature = "metrics")]
pub mod metrics;
#[cfg(feature = "patterns")]
pub mod patterns;

pub use compose::{
    inner_join, multimap, round_robin, try_inner_join, try_multimap, InnerJoin, MultiMap, RoundRobin,
    TryInnerJoin, TryMultiMap,
};
pub use error::{Error, Result};
pub use extensions::{CompositeTransform, SeqExt};
pub use flow::{
    sample, sample_seeded, throttle, time_limited, time_limited_with_delay, Sample, Throttle, TimeLimited,
};
pub use parallel::{parallelize, parallelize_with, try_parallelize, try_parallelize_with, ParallelConfig, Parallelize};
pub use partition::{batch, peek, peek_one, split, Batches, Continuation, Peeked, SplitSide};
pub use stateful::{
    filter_with_state, rolling_aggregate, rolling_aggregate_from, FilterWithState, RollingAggregate,
    RollingAggregateFrom,
};
pub use terminal::{exhaust, exhaust_count};

#[cfg(feature = "cache")]
pub use cache::{CacheConfig, FileCache};
#[cfg(feature = "metrics")]
pub use metrics::{metered, Metered, MetricsCollector};
#[cfg(feature = "patterns")]
pub use patterns::PatternMap;
