//! Partitioning primitives: reshape one sequence into grouped, filtered, or
//! previewed sequences without losing items.
//!
//! - [`batch`]: consecutive fixed-size groups.
//! - [`peek`] / [`peek_one`]: look ahead while keeping every item available.
//! - [`split`]: route each item to a matched or unmatched output.

pub mod batch;
pub mod peek;
pub mod split;
mod tee;

pub use batch::{batch, Batches};
pub use peek::{peek, peek_one, Continuation, Peeked};
pub use split::{split, SplitSide};
