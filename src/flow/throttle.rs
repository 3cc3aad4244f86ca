//! Rate limiting by a fixed blocking delay per item.

use crate::error::{ensure_arg, Error, Result};
use std::iter::FusedIterator;
use std::thread;
use std::time::Duration;

/// Lazy adapter returned by [`throttle`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Throttle<I> {
    iter: I,
    interval: Duration,
}

/// Pass `items` through unchanged, sleeping `1 / max_rate` seconds before each
/// item is emitted.
///
/// The sleep blocks the calling thread and is not cancellable mid-wait. It
/// happens only once an item is actually available, so the end of the stream
/// is reported without delay.
///
/// # Errors
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
/// `max_rate` is not strictly positive, or so small that the interval overflows.
pub fn throttle<I: IntoIterator>(items: I, max_rate: f64) -> Result<Throttle<I::IntoIter>> {
    ensure_arg(max_rate > 0.0, "max_rate", || {
        format!("throttle rate must be positive, got {max_rate}")
    })?;
    let interval = Duration::try_from_secs_f64(1.0 / max_rate).map_err(|e| {
        Error::invalid_argument("max_rate", format!("rate {max_rate} gives no usable interval: {e}"))
    })?;
    Ok(Throttle {
        iter: items.into_iter(),
        interval,
    })
}

impl<I> Throttle<I> {
    /// Delay applied before each item.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl<I: Iterator> Iterator for Throttle<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.iter.next()?;
        thread::sleep(self.interval);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I: FusedIterator> FusedIterator for Throttle<I> {}
