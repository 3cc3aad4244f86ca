//! Probabilistic thinning of a sequence.
//!
//! Each item is kept independently with probability `rate`: a fresh uniform
//! draw in `[0, 1)` is taken per item and the item survives iff the draw is
//! `< rate`. `rate == 0.0` therefore drops everything and `rate == 1.0` keeps
//! everything in order.
//!
//! [`sample`] seeds its generator from process randomness on every call;
//! [`sample_seeded`] takes an explicit seed so runs are reproducible.

use crate::error::{ensure_arg, Result};
use crate::flow::rng::SplitMix64;
use std::iter::FusedIterator;

/// Lazy adapter returned by [`sample`] and [`sample_seeded`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Sample<I> {
    iter: I,
    rate: f64,
    rng: SplitMix64,
}

fn check_rate(rate: f64) -> Result<()> {
    ensure_arg((0.0..=1.0).contains(&rate), "rate", || {
        format!("sample rate must be within [0, 1], got {rate}")
    })
}

/// Keep each item of `items` with probability `rate`.
///
/// # Errors
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `rate`
/// is outside `[0, 1]` or NaN.
pub fn sample<I: IntoIterator>(items: I, rate: f64) -> Result<Sample<I::IntoIter>> {
    check_rate(rate)?;
    Ok(Sample {
        iter: items.into_iter(),
        rate,
        rng: SplitMix64::from_entropy(),
    })
}

/// Deterministic [`sample`]: the same `seed` and input give the same output.
///
/// # Errors
/// Same as [`sample`].
///
/// # Example
/// ```
/// let a: Vec<u32> = ironseq::sample_seeded(0..1000, 0.1, 42)?.collect();
/// let b: Vec<u32> = ironseq::sample_seeded(0..1000, 0.1, 42)?.collect();
/// assert_eq!(a, b);
/// # Ok::<(), ironseq::Error>(())
/// ```
pub fn sample_seeded<I: IntoIterator>(items: I, rate: f64, seed: u64) -> Result<Sample<I::IntoIter>> {
    check_rate(rate)?;
    Ok(Sample {
        iter: items.into_iter(),
        rate,
        rng: SplitMix64::new(seed),
    })
}

impl<I: Iterator> Iterator for Sample<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.iter.next()?;
            if self.rng.next_f64() < self.rate {
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I: FusedIterator> FusedIterator for Sample<I> {}
