//! Flow-control primitives that decide when, and whether, an item passes.
//!
//! - [`throttle`]: fixed blocking delay before each item.
//! - [`time_limited`] / [`time_limited_with_delay`]: stop after a wall-clock budget.
//! - [`sample`] / [`sample_seeded`]: keep each item with a fixed probability.

mod rng;
pub mod sample;
pub mod throttle;
pub mod time_limited;

pub use sample::{sample, sample_seeded, Sample};
pub use throttle::{throttle, Throttle};
pub use time_limited::{time_limited, time_limited_with_delay, TimeLimited};
