//! Wall-clock bounded consumption.
//!
//! The clock starts on the first pull, which always reaches the source. Before
//! every subsequent pull the elapsed time is compared against `max_duration`;
//! once it is exceeded the adapter stops for good without pulling another item
//! from the source.
//!
//! With a non-zero `delay_per_item` the adapter blocks for that long after each
//! emitted item. Because iteration is pull-based the delay is served at the
//! start of the following pull, before the elapsed-time check, which bounds
//! output to roughly `max_duration / delay_per_item` items.

use std::iter::FusedIterator;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Lazy adapter returned by [`time_limited`] and [`time_limited_with_delay`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TimeLimited<I> {
    iter: I,
    max_duration: Duration,
    delay_per_item: Duration,
    started: Option<Instant>,
    owes_delay: bool,
    expired: bool,
}

/// Yield from `items` until `max_duration` has elapsed since the first pull.
pub fn time_limited<I: IntoIterator>(items: I, max_duration: Duration) -> TimeLimited<I::IntoIter> {
    time_limited_with_delay(items, max_duration, Duration::ZERO)
}

/// [`time_limited`] with a blocking `delay_per_item` after each emitted item.
pub fn time_limited_with_delay<I: IntoIterator>(
    items: I,
    max_duration: Duration,
    delay_per_item: Duration,
) -> TimeLimited<I::IntoIter> {
    TimeLimited {
        iter: items.into_iter(),
        max_duration,
        delay_per_item,
        started: None,
        owes_delay: false,
        expired: false,
    }
}

impl<I> TimeLimited<I> {
    /// `true` once the time budget has run out.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.expired
    }
}

impl<I: Iterator> TimeLimited<I> {
    fn pull(&mut self) -> Option<I::Item> {
        let item = self.iter.next()?;
        self.owes_delay = !self.delay_per_item.is_zero();
        Some(item)
    }
}

impl<I: Iterator> Iterator for TimeLimited<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.expired {
            return None;
        }
        if self.owes_delay {
            thread::sleep(self.delay_per_item);
            self.owes_delay = false;
        }
        let Some(started) = self.started else {
            self.started = Some(Instant::now());
            return self.pull();
        };
        let elapsed = started.elapsed();
        if elapsed > self.max_duration {
            debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = self.max_duration.as_millis() as u64,
                "time limit reached, ending stream"
            );
            self.expired = true;
            return None;
        }
        self.pull()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.expired {
            (0, Some(0))
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<I: FusedIterator> FusedIterator for TimeLimited<I> {}
