//! Item counters and stage timing for sequence pipelines.
//!
//! A [`MetricsCollector`] is a cheap, cloneable handle to a shared registry of
//! named counters, custom [`Metric`]s and a start/end clock. Pipelines feed it
//! through [`metered`] (or [`SeqExt::metered`](crate::SeqExt::metered)), a
//! pass-through adapter that counts every item flowing past one stage.
//!
//! # Example
//!
//! ```
//! use ironseq::metrics::MetricsCollector;
//! use ironseq::SeqExt;
//!
//! let metrics = MetricsCollector::new();
//! metrics.record_start();
//! let kept = (0..100)
//!     .metered("read", &metrics)
//!     .filter(|x| x % 3 == 0)
//!     .metered("kept", &metrics)
//!     .exhaust_count();
//! metrics.record_end();
//!
//! assert_eq!(metrics.counter("read"), Some(100));
//! assert_eq!(metrics.counter("kept"), Some(kept as u64));
//! assert!(metrics.elapsed().is_some());
//! ```

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A custom value reported alongside the built-in counters.
pub trait Metric: Send + Sync {
    /// Key under which the metric is reported.
    fn name(&self) -> &str;

    /// Current value as JSON.
    fn value(&self) -> Value;

    /// Optional human-readable description.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// A fixed numeric reading, e.g. a configured rate or a measured ratio.
#[derive(Clone, Debug)]
pub struct GaugeMetric {
    name: String,
    value: f64,
    description: Option<String>,
}

impl GaugeMetric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Metric for GaugeMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        json!(self.value)
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Default)]
struct Registry {
    counters: BTreeMap<String, u64>,
    custom: BTreeMap<String, Box<dyn Metric>>,
    started: Option<Instant>,
    finished: Option<Instant>,
}

/// Shared, thread-safe metrics registry. Clones observe the same state.
#[derive(Clone, Default)]
pub struct MetricsCollector {
    inner: Arc<Mutex<Registry>>,
}

impl MetricsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a counter half-written.
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a custom metric, replacing any metric with the same name.
    pub fn register(&self, metric: Box<dyn Metric>) {
        self.registry().custom.insert(metric.name().to_string(), metric);
    }

    /// Start the clock.
    pub fn record_start(&self) {
        self.registry().started = Some(Instant::now());
    }

    /// Stop the clock.
    pub fn record_end(&self) {
        self.registry().finished = Some(Instant::now());
    }

    /// Time between [`record_start`](Self::record_start) and
    /// [`record_end`](Self::record_end), if both were called in that order.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let registry = self.registry();
        match (registry.started, registry.finished) {
            (Some(start), Some(end)) => end.checked_duration_since(start),
            _ => None,
        }
    }

    /// Add `by` to the counter `name`, creating it at zero first if needed.
    pub fn increment_counter(&self, name: &str, by: u64) {
        let mut registry = self.registry();
        let slot = registry.counters.entry(name.to_string()).or_insert(0);
        *slot = slot.saturating_add(by);
    }

    /// Overwrite the counter `name`.
    pub fn set_counter(&self, name: &str, value: u64) {
        self.registry().counters.insert(name.to_string(), value);
    }

    /// Current value of counter `name`.
    #[must_use]
    pub fn counter(&self, name: &str) -> Option<u64> {
        self.registry().counters.get(name).copied()
    }

    /// Every counter and custom metric by name, without descriptions.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        let registry = self.registry();
        let counters = registry.counters.iter().map(|(name, n)| (name.clone(), json!(n)));
        let custom = registry.custom.iter().map(|(name, m)| (name.clone(), m.value()));
        counters.chain(custom).collect()
    }

    /// Report as a JSON object: `{ name: { "value": .., "description"?: .. } }`,
    /// plus `elapsed_ms` when the clock was stopped.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let registry = self.registry();
        let mut report = Map::new();
        for (name, count) in &registry.counters {
            report.insert(name.clone(), json!({ "value": count }));
        }
        for (name, metric) in &registry.custom {
            let mut entry = Map::new();
            entry.insert("value".to_string(), metric.value());
            if let Some(description) = metric.description() {
                entry.insert("description".to_string(), json!(description));
            }
            report.insert(name.clone(), Value::Object(entry));
        }
        if let (Some(start), Some(end)) = (registry.started, registry.finished) {
            let elapsed = end.saturating_duration_since(start);
            report.insert(
                "elapsed_ms".to_string(),
                json!({
                    "value": elapsed.as_millis(),
                    "description": "Wall-clock time between record_start and record_end",
                }),
            );
        }
        Value::Object(report)
    }

    /// Print a sorted, human-readable report to stdout.
    pub fn print(&self) {
        println!("\n========== Sequence Metrics ==========");
        if let Some(elapsed) = self.elapsed() {
            println!("Elapsed: {:.3}s ({} ms)", elapsed.as_secs_f64(), elapsed.as_millis());
            println!("--------------------------------------");
        }
        for (name, value) in self.snapshot() {
            println!("{name}: {value}");
        }
        println!("======================================\n");
    }

    /// Write [`to_json`](Self::to_json) to `path`, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let formatted = serde_json::to_string_pretty(&self.to_json())?;
        let mut file = File::create(path)
            .with_context(|| format!("failed to create metrics file {}", path.display()))?;
        file.write_all(formatted.as_bytes())
            .context("failed to write metrics")?;
        Ok(())
    }
}

/// Lazy adapter returned by [`metered`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Metered<I> {
    iter: I,
    name: String,
    collector: MetricsCollector,
}

/// Pass `items` through unchanged, adding one to counter `name` per item.
///
/// The counter is created (at zero) immediately, so a stage that never sees
/// an item still shows up in the report.
pub fn metered<I: IntoIterator>(items: I, name: &str, collector: &MetricsCollector) -> Metered<I::IntoIter> {
    collector.increment_counter(name, 0);
    Metered {
        iter: items.into_iter(),
        name: name.to_string(),
        collector: collector.clone(),
    }
}

impl<I: Iterator> Iterator for Metered<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.iter.next()?;
        self.collector.increment_counter(&self.name, 1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I: FusedIterator> FusedIterator for Metered<I> {}
