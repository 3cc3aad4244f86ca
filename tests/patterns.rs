#![cfg(feature = "patterns")]

use anyhow::Result;
use ironseq::patterns::PatternMap;

#[test]
fn lookup_returns_every_match_in_insertion_order() -> Result<()> {
    let mut map = PatternMap::new();
    map.insert(r"err", 1)?;
    map.insert(r"e", 2)?;
    map.insert(r"warn", 3)?;
    assert_eq!(map.get("error: disk full"), vec![&1, &2]);
    assert_eq!(map.get("warning"), vec![&3]);
    assert!(map.get("info").is_empty());
    assert_eq!(map.len(), 3);
    Ok(())
}

#[test]
fn matching_is_anchored_at_the_start() -> Result<()> {
    let mut map = PatternMap::new();
    map.insert(r"\d+", "number")?;
    assert_eq!(map.get("42 apples"), vec![&"number"]);
    assert!(map.get("apples 42").is_empty());
    assert!(map.contains("7"));
    assert!(!map.contains("x7"));
    Ok(())
}

#[test]
fn alternation_is_anchored_as_a_whole() -> Result<()> {
    let mut map = PatternMap::new();
    map.insert("a|b", ())?;
    assert!(map.contains("b-side"));
    assert!(!map.contains("xb"));
    Ok(())
}

#[test]
fn invalid_pattern_is_rejected() {
    let mut map: PatternMap<u8> = PatternMap::new();
    let err = map.insert("(unclosed", 0).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(map.is_empty());
}

#[test]
fn memo_is_cleared_on_mutation() -> Result<()> {
    let mut map = PatternMap::new();
    map.insert("a", 'a')?;
    assert_eq!(map.get("abc"), vec![&'a']);
    assert_eq!(map.memoized(), 1);

    map.insert("ab", 'b')?;
    assert_eq!(map.memoized(), 0);
    assert_eq!(map.get("abc"), vec![&'a', &'b']);

    assert_eq!(map.remove("a"), Some('a'));
    assert_eq!(map.get("abc"), vec![&'b']);
    Ok(())
}

#[test]
fn reinserting_a_pattern_replaces_its_value() -> Result<()> {
    let mut map = PatternMap::new();
    assert_eq!(map.insert("x", 1)?, None);
    assert_eq!(map.insert("x", 2)?, Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("x"), vec![&2]);
    Ok(())
}

#[test]
fn pop_matching_removes_matches_only() -> Result<()> {
    let mut map = PatternMap::new();
    map.insert("GET ", "read")?;
    map.insert("POST ", "write")?;
    map.insert("[A-Z]+ ", "any")?;
    assert_eq!(map.pop_matching("GET /index"), vec!["read", "any"]);
    assert_eq!(map.patterns().collect::<Vec<_>>(), vec!["POST "]);
    assert_eq!(map.pop_last(), Some(("POST ".to_string(), "write")));
    assert!(map.is_empty());
    Ok(())
}

#[test]
fn iteration_views() -> Result<()> {
    let mut map = PatternMap::new();
    map.insert("a.*", 10)?;
    map.insert("b.*", 20)?;
    assert_eq!(map.values().sum::<i32>(), 30);
    assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a.*", &10), ("b.*", &20)]);
    Ok(())
}
