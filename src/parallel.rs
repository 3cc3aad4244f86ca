//! Unordered parallel application of a pure function.
//!
//! [`parallelize`] owns a dedicated Rayon thread pool for the lifetime of the
//! returned iterator. Input items are pulled lazily on the consumer's thread and
//! submitted to the pool, with the number of submitted-but-unfinished items capped
//! at `workers * in_flight_per_worker`, so an unbounded input never piles up in
//! memory. Results are yielded in completion order, **not** input order.
//!
//! ## Failure model
//!
//! All-or-error. A function that returns an error, or panics, inside a worker is
//! yielded once as [`Error::Worker`]; queued items that have not started are
//! skipped, running ones are waited for, the pool is shut down and the iterator
//! ends. There is no per-item error capture: wrap the function's output in a
//! `Result` yourself if one failure should not stop the rest.
//!
//! ## Cleanup
//!
//! Dropping the iterator early has the same effect as a failure: outstanding
//! work is skipped or drained, and every worker thread has exited, before
//! `drop` returns.
//!
//! # Example
//! ```
//! use ironseq::parallelize;
//!
//! # fn main() -> ironseq::Result<()> {
//! let mut squares = parallelize(|x: u64| x * x, 0..100)?.collect::<ironseq::Result<Vec<_>>>()?;
//! squares.sort_unstable();
//! assert_eq!(squares[..4], [0, 1, 4, 9]);
//! # Ok(())
//! # }
//! ```

use crate::error::{ensure_arg, Error, Result};
use anyhow::anyhow;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::convert::Infallible;
use std::fmt;
use std::iter::{Fuse, FusedIterator};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use tracing::{debug, trace};

/// Worker pool sizing for [`parallelize_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of worker threads. `None` uses the available hardware parallelism.
    pub workers: Option<usize>,
    /// Items allowed in flight per worker before the input stops being pulled.
    pub in_flight_per_worker: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: None,
            in_flight_per_worker: 2,
        }
    }
}

impl ParallelConfig {
    /// Use exactly `workers` threads.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Allow `factor` submitted items per worker.
    #[must_use]
    pub const fn with_in_flight_per_worker(mut self, factor: usize) -> Self {
        self.in_flight_per_worker = factor;
        self
    }

    /// Resolved worker count.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Resolved cap on submitted-but-unfinished items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.worker_count().saturating_mul(self.in_flight_per_worker)
    }

    fn validate(&self) -> Result<()> {
        ensure_arg(self.worker_count() > 0, "workers", || {
            "worker pool needs at least one worker".to_string()
        })?;
        ensure_arg(self.in_flight_per_worker > 0, "in_flight_per_worker", || {
            "in-flight factor must be at least 1".to_string()
        })
    }
}

/// Worker threads of one pool that have not exited yet.
struct LiveWorkers {
    count: Mutex<usize>,
    exited: Condvar,
}

impl LiveWorkers {
    fn new(workers: usize) -> Self {
        Self {
            count: Mutex::new(workers),
            exited: Condvar::new(),
        }
    }

    fn exit(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count = count.saturating_sub(1);
        self.exited.notify_all();
    }

    fn wait(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        while *count > 0 {
            count = self.exited.wait(count).unwrap_or_else(PoisonError::into_inner);
        }
    }
}

type Task<T, R> = Arc<dyn Fn(T) -> anyhow::Result<R> + Send + Sync>;

enum Outcome<R> {
    Done(R),
    Failed(anyhow::Error),
    Skipped,
}

/// Iterator returned by [`parallelize`] and friends.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Parallelize<I: Iterator, R> {
    input: Fuse<I>,
    task: Task<I::Item, R>,
    pool: Option<ThreadPool>,
    live_workers: Arc<LiveWorkers>,
    sender: Sender<Outcome<R>>,
    receiver: Receiver<Outcome<R>>,
    cancelled: Arc<AtomicBool>,
    in_flight: usize,
    capacity: usize,
}

/// Apply `function` to every item on a default-sized worker pool.
///
/// # Errors
/// Returns [`Error::Worker`] if the pool cannot be created.
pub fn parallelize<I, F, R>(function: F, items: I) -> Result<Parallelize<I::IntoIter, R>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    F: Fn(I::Item) -> R + Send + Sync + 'static,
    R: Send + 'static,
{
    parallelize_with(ParallelConfig::default(), function, items)
}

/// [`parallelize`] with an explicit pool configuration.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for a zero-sized configuration and
/// [`Error::Worker`] if the pool cannot be created.
pub fn parallelize_with<I, F, R>(
    config: ParallelConfig,
    function: F,
    items: I,
) -> Result<Parallelize<I::IntoIter, R>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    F: Fn(I::Item) -> R + Send + Sync + 'static,
    R: Send + 'static,
{
    try_parallelize_with(config, move |item| Ok::<R, Infallible>(function(item)), items)
}

/// [`parallelize`] for a function that can fail.
///
/// # Errors
/// Same as [`parallelize`].
pub fn try_parallelize<I, F, R, E>(function: F, items: I) -> Result<Parallelize<I::IntoIter, R>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    F: Fn(I::Item) -> std::result::Result<R, E> + Send + Sync + 'static,
    R: Send + 'static,
    E: Into<anyhow::Error>,
{
    try_parallelize_with(ParallelConfig::default(), function, items)
}

/// [`try_parallelize`] with an explicit pool configuration.
///
/// # Errors
/// Same as [`parallelize_with`].
pub fn try_parallelize_with<I, F, R, E>(
    config: ParallelConfig,
    function: F,
    items: I,
) -> Result<Parallelize<I::IntoIter, R>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    F: Fn(I::Item) -> std::result::Result<R, E> + Send + Sync + 'static,
    R: Send + 'static,
    E: Into<anyhow::Error>,
{
    config.validate()?;
    let workers = config.worker_count();
    let live_workers = Arc::new(LiveWorkers::new(workers));
    let on_exit = Arc::clone(&live_workers);
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("ironseq-worker-{i}"))
        .exit_handler(move |_| on_exit.exit())
        .build()
        .map_err(Error::worker)?;
    let capacity = config.capacity();
    debug!(workers, capacity, "worker pool started");

    let (sender, receiver) = mpsc::channel();
    Ok(Parallelize {
        input: items.into_iter().fuse(),
        task: Arc::new(move |item: I::Item| -> anyhow::Result<R> {
            function(item).map_err(Into::into)
        }),
        pool: Some(pool),
        live_workers,
        sender,
        receiver,
        cancelled: Arc::new(AtomicBool::new(false)),
        in_flight: 0,
        capacity,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl<I: Iterator, R> Parallelize<I, R> {
    /// Items submitted to the pool whose results have not been yielded yet.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Stop submitting, skip queued work, wait for running work, then join
    /// every worker thread.
    fn shutdown(&mut self) {
        let Some(pool) = self.pool.take() else {
            return;
        };
        self.cancelled.store(true, Ordering::Release);
        while self.in_flight > 0 && self.receiver.recv().is_ok() {
            self.in_flight -= 1;
        }
        // Dropping the pool only signals its threads; they exit once idle.
        drop(pool);
        self.live_workers.wait();
        debug!("worker pool shut down");
    }
}

impl<I, R> Parallelize<I, R>
where
    I: Iterator,
    I::Item: Send + 'static,
    R: Send + 'static,
{
    fn submit_ready(&mut self) {
        let Some(pool) = &self.pool else {
            return;
        };
        while self.in_flight < self.capacity {
            let Some(item) = self.input.next() else {
                break;
            };
            let task = Arc::clone(&self.task);
            let sender = self.sender.clone();
            let cancelled = Arc::clone(&self.cancelled);
            pool.spawn(move || {
                let outcome = if cancelled.load(Ordering::Acquire) {
                    Outcome::Skipped
                } else {
                    match panic::catch_unwind(AssertUnwindSafe(|| task(item))) {
                        Ok(Ok(value)) => Outcome::Done(value),
                        Ok(Err(e)) => Outcome::Failed(e),
                        Err(payload) => {
                            Outcome::Failed(anyhow!("worker panicked: {}", panic_message(&*payload)))
                        }
                    }
                };
                // The receiver outlives every submitted job; see `shutdown`.
                let _ = sender.send(outcome);
            });
            self.in_flight += 1;
            trace!(in_flight = self.in_flight, "item submitted");
        }
    }
}

impl<I, R> Iterator for Parallelize<I, R>
where
    I: Iterator,
    I::Item: Send + 'static,
    R: Send + 'static,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Result<R>> {
        loop {
            self.submit_ready();
            if self.in_flight == 0 {
                self.shutdown();
                return None;
            }
            let outcome = self.receiver.recv().ok()?;
            self.in_flight -= 1;
            match outcome {
                Outcome::Done(value) => return Some(Ok(value)),
                Outcome::Failed(e) => {
                    debug!(error = %e, "worker failed, cancelling remaining work");
                    self.shutdown();
                    return Some(Err(Error::Worker(e)));
                }
                Outcome::Skipped => continue,
            }
        }
    }
}

impl<I, R> FusedIterator for Parallelize<I, R>
where
    I: Iterator,
    I::Item: Send + 'static,
    R: Send + 'static,
{
}

impl<I: Iterator, R> Drop for Parallelize<I, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<I: Iterator, R> fmt::Debug for Parallelize<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parallelize")
            .field("in_flight", &self.in_flight)
            .field("capacity", &self.capacity)
            .field("running", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}
