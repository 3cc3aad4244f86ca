//! Helpers for testing code built on the sequence primitives.
//!
//! - **Assertions** drain a sequence and compare it against an expectation,
//!   with or without regard to order, or check a two-way partition.
//! - **Sources** wrap an iterator so a test can observe how often, and how
//!   far, it was actually pulled.
//!
//! # Example
//!
//! ```
//! use ironseq::testing::{assert_yields, CountingIter};
//! use ironseq::SeqExt;
//!
//! # fn main() -> ironseq::Result<()> {
//! let source = CountingIter::new(0..100);
//! let pulls = source.counter();
//!
//! let mut batches = source.batch(4)?;
//! assert_yields(batches.next(), [vec![0, 1, 2, 3]]);
//! assert_eq!(pulls.get(), 4);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod sources;

pub use assertions::*;
pub use sources::*;
