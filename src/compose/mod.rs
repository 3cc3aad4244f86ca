//! Composition primitives: combine several functions or sequences into one
//! output sequence.
//!
//! - [`multimap`] / [`try_multimap`]: per-item function chain.
//! - [`round_robin`]: interleave inputs one item at a time.
//! - [`inner_join`] / [`try_inner_join`]: hash join against a materialized right side.

pub mod join;
pub mod multimap;
pub mod round_robin;

pub use join::{inner_join, try_inner_join, InnerJoin, TryInnerJoin};
pub use multimap::{multimap, try_multimap, MultiMap, TryMultiMap};
pub use round_robin::{round_robin, RoundRobin};
