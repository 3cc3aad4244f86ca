//! A lookup table keyed by regular expressions instead of exact strings.
//!
//! [`PatternMap`] stores `(pattern, value)` pairs in insertion order. Looking
//! up a string returns every value whose pattern matches at the *start* of the
//! string. Lookups are memoized per key; any mutation drops the memo.
//!
//! # Example
//!
//! ```
//! use ironseq::patterns::PatternMap;
//!
//! # fn main() -> ironseq::Result<()> {
//! let mut routes = PatternMap::new();
//! routes.insert(r"/api/", "api")?;
//! routes.insert(r"/api/v\d+/", "versioned")?;
//! routes.insert(r"/static/", "assets")?;
//!
//! assert_eq!(routes.get("/api/v2/users"), vec![&"api", &"versioned"]);
//! assert!(routes.get("/v1/api/").is_empty());
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!(r"\A(?:{pattern})"))
        .map_err(|e| Error::invalid_argument("pattern", format!("invalid pattern `{pattern}`: {e}")))
}

struct Entry<V> {
    source: String,
    regex: Regex,
    value: V,
}

/// Regex-keyed map. See the [module docs](self).
pub struct PatternMap<V> {
    entries: Vec<Entry<V>>,
    memo: HashMap<String, Vec<usize>>,
}

impl<V> Default for PatternMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            memo: HashMap::new(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for PatternMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> PatternMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `value` under `pattern`. Re-inserting an existing pattern
    /// replaces its value in place and returns the old one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `pattern` does not compile.
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<Option<V>> {
        let regex = compile(pattern)?;
        self.memo.clear();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.source == pattern) {
            return Ok(Some(std::mem::replace(&mut entry.value, value)));
        }
        self.entries.push(Entry {
            source: pattern.to_string(),
            regex,
            value,
        });
        Ok(None)
    }

    /// Remove the entry stored under exactly `pattern`.
    pub fn remove(&mut self, pattern: &str) -> Option<V> {
        let index = self.entries.iter().position(|e| e.source == pattern)?;
        self.memo.clear();
        Some(self.entries.remove(index).value)
    }

    fn matching(&mut self, key: &str) -> &[usize] {
        let entries = &self.entries;
        self.memo.entry(key.to_string()).or_insert_with(|| {
            entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.regex.is_match(key))
                .map(|(i, _)| i)
                .collect()
        })
    }

    /// Every value whose pattern matches the start of `key`, in insertion order.
    pub fn get(&mut self, key: &str) -> Vec<&V> {
        let hits = self.matching(key).to_vec();
        hits.into_iter().map(|i| &self.entries[i].value).collect()
    }

    /// `true` if any pattern matches the start of `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.memo.get(key).map_or_else(
            || self.entries.iter().any(|e| e.regex.is_match(key)),
            |hits| !hits.is_empty(),
        )
    }

    /// Remove and return every value whose pattern matches the start of `key`.
    pub fn pop_matching(&mut self, key: &str) -> Vec<V> {
        self.memo.clear();
        let (hit, kept) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition::<Vec<_>, _>(|e| e.regex.is_match(key));
        self.entries = kept;
        hit.into_iter().map(|e| e.value).collect()
    }

    /// Remove and return the most recently inserted entry.
    pub fn pop_last(&mut self) -> Option<(String, V)> {
        let entry = self.entries.pop()?;
        self.memo.clear();
        Some((entry.source, entry.value))
    }

    /// Stored patterns, as written by the caller, in insertion order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.source.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|e| &e.value)
    }

    /// `(pattern, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|e| (e.source.as_str(), &e.value))
    }

    /// Number of distinct keys whose lookups are currently memoized.
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }
}
