//! Key-based inner join of a streamed left side against an indexed right side.
//!
//! The right sequence is fully materialized into a `key -> item` index when the
//! join is built, costing `O(|right|)` memory for the lifetime of the join. The
//! left sequence is then streamed lazily and each left item whose key is in the
//! index produces one `(left, right)` pair.
//!
//! ### Notes
//! - Duplicate right keys: the last right item indexed for a key wins.
//! - Duplicate left keys: every left occurrence produces its own pair.
//! - Output follows left order.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;

/// Lazy adapter returned by [`inner_join`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct InnerJoin<L, K, R, F> {
    left: L,
    key_left: F,
    index: HashMap<K, R>,
}

fn index_right<R, K, G>(right: impl IntoIterator<Item = R>, mut key_right: G) -> HashMap<K, R>
where
    K: Eq + Hash,
    G: FnMut(&R) -> K,
{
    right
        .into_iter()
        .map(|item| (key_right(&item), item))
        .collect()
}

/// Join `left` with `right` on `key_left(l) == key_right(r)`.
///
/// `right` is consumed eagerly to build the index; `left` is streamed.
///
/// # Example
/// ```
/// let users = vec![(1, "ada"), (2, "bob"), (3, "cy")];
/// let scores = vec![(1, 90), (3, 75)];
/// let joined: Vec<_> = ironseq::inner_join(users, scores, |u| u.0, |s| s.0).collect();
/// assert_eq!(joined, vec![((1, "ada"), (1, 90)), ((3, "cy"), (3, 75))]);
/// ```
pub fn inner_join<L, R, K, F, G>(
    left: L,
    right: R,
    key_left: F,
    key_right: G,
) -> InnerJoin<L::IntoIter, K, R::Item, F>
where
    L: IntoIterator,
    R: IntoIterator,
    R::Item: Clone,
    K: Eq + Hash,
    F: FnMut(&L::Item) -> K,
    G: FnMut(&R::Item) -> K,
{
    InnerJoin {
        left: left.into_iter(),
        key_left,
        index: index_right(right, key_right),
    }
}

impl<L, K, R, F> InnerJoin<L, K, R, F> {
    /// Number of distinct keys held in the right-side index.
    #[must_use]
    pub fn indexed(&self) -> usize {
        self.index.len()
    }
}

impl<L, K, R, F> Iterator for InnerJoin<L, K, R, F>
where
    L: Iterator,
    K: Eq + Hash,
    R: Clone,
    F: FnMut(&L::Item) -> K,
{
    type Item = (L::Item, R);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.left.next()?;
            if let Some(matched) = self.index.get(&(self.key_left)(&item)) {
                return Some((item, matched.clone()));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.left.size_hint().1)
    }
}

impl<L, K, R, F> FusedIterator for InnerJoin<L, K, R, F>
where
    L: FusedIterator,
    K: Eq + Hash,
    R: Clone,
    F: FnMut(&L::Item) -> K,
{
}

/// Lazy adapter returned by [`try_inner_join`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TryInnerJoin<L, K, R, F> {
    left: L,
    key_left: F,
    index: HashMap<K, R>,
    failed: bool,
}

/// Fallible [`inner_join`] for key functions that can fail.
///
/// # Errors
/// Returns [`Error::Callback`] immediately if `key_right` fails while the right
/// side is being indexed. A `key_left` failure is yielded as an `Err` item and
/// ends the sequence.
pub fn try_inner_join<L, R, K, F, G, E>(
    left: L,
    right: R,
    key_left: F,
    mut key_right: G,
) -> Result<TryInnerJoin<L::IntoIter, K, R::Item, F>>
where
    L: IntoIterator,
    R: IntoIterator,
    R::Item: Clone,
    K: Eq + Hash,
    F: FnMut(&L::Item) -> std::result::Result<K, E>,
    G: FnMut(&R::Item) -> std::result::Result<K, E>,
    E: Into<anyhow::Error>,
{
    let mut index = HashMap::new();
    for item in right {
        let key = key_right(&item).map_err(Error::callback)?;
        index.insert(key, item);
    }
    Ok(TryInnerJoin {
        left: left.into_iter(),
        key_left,
        index,
        failed: false,
    })
}

impl<L, K, R, F, E> Iterator for TryInnerJoin<L, K, R, F>
where
    L: Iterator,
    K: Eq + Hash,
    R: Clone,
    F: FnMut(&L::Item) -> std::result::Result<K, E>,
    E: Into<anyhow::Error>,
{
    type Item = Result<(L::Item, R)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let item = self.left.next()?;
            match (self.key_left)(&item) {
                Ok(key) => {
                    if let Some(matched) = self.index.get(&key) {
                        return Some(Ok((item, matched.clone())));
                    }
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(Error::callback(e)));
                }
            }
        }
    }
}
