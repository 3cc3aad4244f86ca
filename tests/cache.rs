#![cfg(feature = "cache")]

use anyhow::{anyhow, Result};
use ironseq::cache::{CacheConfig, FileCache};
use ironseq::testing::CountingIter;
use ironseq::SeqExt;
use std::cell::Cell;
use std::time::Duration;

fn cache_in(dir: &std::path::Path) -> Result<FileCache> {
    Ok(FileCache::new(CacheConfig {
        directory: dir.to_path_buf(),
        ..CacheConfig::default()
    })?)
}

#[test]
fn computes_once_then_hits() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let cache = cache_in(tmp.path())?;
    let calls = Cell::new(0);
    let compute = || {
        calls.set(calls.get() + 1);
        vec![1u32, 2, 3]
    };

    assert_eq!(cache.get_or_compute("k", compute)?, vec![1, 2, 3]);
    assert_eq!(cache.get_or_compute("k", compute)?, vec![1, 2, 3]);
    assert_eq!(calls.get(), 1);
    assert!(cache.entry_path("k").exists());
    Ok(())
}

#[test]
fn entries_survive_a_new_handle() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    cache_in(tmp.path())?.put("answer", &42u64)?;
    let reopened = cache_in(tmp.path())?;
    assert_eq!(reopened.get::<u64>("answer")?, Some(42));
    assert_eq!(reopened.get::<u64>("missing")?, None);
    Ok(())
}

#[test]
fn expired_entries_are_recomputed() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let cache = FileCache::new(CacheConfig {
        directory: tmp.path().to_path_buf(),
        lifetime: Some(Duration::from_millis(300)),
        ..CacheConfig::default()
    })?;
    assert_eq!(cache.get_or_compute("t", || 1u8)?, 1);
    assert_eq!(cache.get_or_compute("t", || 2u8)?, 1);
    std::thread::sleep(Duration::from_millis(400));
    assert_eq!(cache.get::<u8>("t")?, None);
    assert_eq!(cache.get_or_compute("t", || 3u8)?, 3);
    Ok(())
}

#[test]
fn namespaces_are_isolated() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = |namespace: &str| CacheConfig {
        directory: tmp.path().to_path_buf(),
        namespace: namespace.to_string(),
        ..CacheConfig::default()
    };
    let a = FileCache::new(config("a"))?;
    let b = FileCache::new(config("b"))?;
    a.put("k", &"from a".to_string())?;
    b.put("k", &"from b".to_string())?;
    b.put("other", &0u8)?;

    assert_eq!(a.get::<String>("k")?.as_deref(), Some("from a"));
    assert_eq!(a.clear()?, 1);
    assert_eq!(a.get::<String>("k")?, None);
    assert_eq!(b.get::<String>("k")?.as_deref(), Some("from b"));
    Ok(())
}

#[test]
fn invalidate_removes_one_entry() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let cache = cache_in(tmp.path())?;
    cache.put("x", &1i32)?;
    cache.put("y", &2i32)?;
    assert!(cache.invalidate("x")?);
    assert!(!cache.invalidate("x")?);
    assert_eq!(cache.get::<i32>("x")?, None);
    assert_eq!(cache.get::<i32>("y")?, Some(2));
    Ok(())
}

#[test]
fn memoize_vec_skips_the_source_on_hit() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let cache = cache_in(tmp.path())?;

    let first = cache.memoize_vec("batches", (0..10u32).batch(3)?)?;
    assert_eq!(first, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9]]);

    let source = CountingIter::new(0..10u32);
    let pulls = source.counter();
    let second = cache.memoize_vec("batches", source.batch(3)?)?;
    assert_eq!(second, first);
    assert_eq!(pulls.get(), 0);
    Ok(())
}

#[test]
fn failed_computation_stores_nothing() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let cache = cache_in(tmp.path())?;
    let err = cache
        .try_get_or_compute("f", || Err::<u8, _>(anyhow!("upstream down")))
        .unwrap_err();
    assert!(err.is_callback());
    assert!(!cache.entry_path("f").exists());
    assert_eq!(cache.try_get_or_compute("f", || Ok::<_, anyhow::Error>(5u8))?, 5);
    Ok(())
}

#[test]
fn undecodable_entry_is_recomputed() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let cache = cache_in(tmp.path())?;
    std::fs::write(cache.entry_path("bad"), [0xff, 0xff, 0xff])?;
    assert!(cache.get::<String>("bad").is_err());
    assert_eq!(cache.get_or_compute("bad", || "fresh".to_string())?, "fresh");
    Ok(())
}

#[test]
fn concurrent_writers_of_one_key_leave_a_single_entry() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let cache = cache_in(tmp.path())?;
    let payloads: Vec<Vec<u32>> = (0..8).map(|i| vec![i; 4096]).collect();

    std::thread::scope(|scope| -> Result<()> {
        let writers: Vec<_> = payloads
            .iter()
            .map(|payload| {
                let cache = &cache;
                scope.spawn(move || -> ironseq::Result<()> {
                    for _ in 0..20 {
                        cache.put("shared", payload)?;
                    }
                    Ok(())
                })
            })
            .collect();
        for writer in writers {
            writer.join().map_err(|_| anyhow!("writer panicked"))??;
        }
        Ok(())
    })?;

    let stored: Vec<u32> = cache.get("shared")?.ok_or_else(|| anyhow!("entry missing"))?;
    assert!(payloads.contains(&stored));

    let files: Vec<_> = std::fs::read_dir(tmp.path())?.collect::<std::io::Result<_>>()?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path(), cache.entry_path("shared"));
    Ok(())
}
