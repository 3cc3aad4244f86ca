use anyhow::{anyhow, Result};
use ironseq::testing::{assert_yields_unordered, CountingIter};
use ironseq::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn parallelize_yields_every_result_once() -> Result<()> {
    let out = parallelize(|x: u64| x * x, 0..200)?.collect::<ironseq::Result<Vec<_>>>()?;
    assert_yields_unordered(out, (0..200).map(|x| x * x));
    Ok(())
}

#[test]
fn parallelize_of_empty_input() -> Result<()> {
    assert_eq!(parallelize(|x: u8| x, Vec::new())?.count(), 0);
    Ok(())
}

#[test]
fn explicit_config_is_honored() -> Result<()> {
    let config = ParallelConfig::default().with_workers(3).with_in_flight_per_worker(4);
    assert_eq!(config.worker_count(), 3);
    assert_eq!(config.capacity(), 12);
    let out = parallelize_with(config, |s: String| s.len(), ["a", "bb", "ccc"].map(String::from))?
        .collect::<ironseq::Result<Vec<_>>>()?;
    assert_yields_unordered(out, [1, 2, 3]);
    Ok(())
}

#[test]
fn zero_sized_configs_are_rejected() {
    let no_workers = ParallelConfig::default().with_workers(0);
    assert!(parallelize_with(no_workers, |x: i32| x, 0..3).unwrap_err().is_invalid_argument());

    let no_slots = ParallelConfig::default().with_in_flight_per_worker(0);
    assert!(parallelize_with(no_slots, |x: i32| x, 0..3).unwrap_err().is_invalid_argument());
}

#[test]
fn input_is_pulled_lazily_and_bounded() -> Result<()> {
    let source = CountingIter::new(0..1_000_000u64);
    let pulls = source.counter();
    let config = ParallelConfig::default().with_workers(2).with_in_flight_per_worker(2);
    let mut results = parallelize_with(config, |x: u64| x + 1, source)?;
    assert_eq!(pulls.get(), 0);

    results.next().transpose()?;
    assert!(pulls.get() <= 5, "pulled {} items for one result", pulls.get());
    assert!(results.in_flight() <= 4);
    Ok(())
}

#[test]
fn runs_on_multiple_threads() -> Result<()> {
    let config = ParallelConfig::default().with_workers(4);
    let names = parallelize_with(
        config,
        |_: u32| {
            thread::sleep(Duration::from_millis(5));
            thread::current().name().unwrap_or_default().to_string()
        },
        0..32,
    )?
    .collect::<ironseq::Result<Vec<_>>>()?;
    assert!(names.iter().all(|n| n.starts_with("ironseq-worker-")));
    Ok(())
}

#[test]
fn failing_function_surfaces_worker_error_and_stops() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let config = ParallelConfig::default().with_workers(2);
    let results: Vec<_> = try_parallelize_with(
        config,
        move |x: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            if x == 5 { Err(anyhow!("item {x} rejected")) } else { Ok(x) }
        },
        0..10_000,
    )
    .unwrap()
    .collect();

    let errors: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_worker());
    assert!(errors[0].to_string().contains("item 5 rejected"));
    assert!(results.last().is_some_and(|r| r.is_err()));
    assert!(calls.load(Ordering::SeqCst) < 10_000);
}

#[test]
fn panicking_function_is_reported_not_propagated() {
    let config = ParallelConfig::default().with_workers(2);
    let results: Vec<_> = parallelize_with(
        config,
        |x: u32| {
            assert!(x != 3, "cannot handle three");
            x
        },
        0..8,
    )
    .unwrap()
    .collect();
    let err = results.iter().find_map(|r| r.as_ref().err()).expect("a worker error");
    assert!(err.is_worker());
    assert!(err.to_string().contains("cannot handle three"));
}

#[test]
fn dropping_early_waits_for_running_work() -> Result<()> {
    let finished = Arc::new(AtomicUsize::new(0));
    let done = Arc::clone(&finished);
    let config = ParallelConfig::default().with_workers(2).with_in_flight_per_worker(1);
    let mut results = parallelize_with(
        config,
        move |x: u32| {
            thread::sleep(Duration::from_millis(10));
            done.fetch_add(1, Ordering::SeqCst);
            x
        },
        0..100,
    )?;
    results.next().transpose()?;
    drop(results);

    let settled = finished.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(finished.load(Ordering::SeqCst), settled);
    assert!(settled < 100);
    Ok(())
}

#[test]
fn dropping_joins_the_worker_threads() -> Result<()> {
    let marker = Arc::new(());
    let held = Arc::clone(&marker);
    let config = ParallelConfig::default().with_workers(4).with_in_flight_per_worker(2);
    let mut results = parallelize_with(
        config,
        move |x: u32| {
            let _held = &held;
            thread::sleep(Duration::from_millis(5));
            x
        },
        0..1_000,
    )?;
    results.next().transpose()?;
    drop(results);

    // Every job closure, and the function they share, is gone once drop returns.
    assert_eq!(Arc::strong_count(&marker), 1);
    Ok(())
}

#[test]
fn try_parallelize_success_path() -> Result<()> {
    let parsed = try_parallelize(|s: &'static str| s.parse::<i64>(), vec!["1", "-2", "30"])?
        .collect::<ironseq::Result<Vec<_>>>()?;
    assert_yields_unordered(parsed, [1, -2, 30]);
    Ok(())
}
