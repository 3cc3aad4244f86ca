//! Terminal operations that drive a sequence to completion.

/// Pull every item from `items` and discard it.
///
/// Used to trigger side effects embedded in upstream lazy stages. Items are
/// dropped one at a time; nothing is buffered.
///
/// # Example
/// ```
/// let mut seen = Vec::new();
/// ironseq::exhaust((0..3).inspect(|x| seen.push(*x)));
/// assert_eq!(seen, vec![0, 1, 2]);
/// ```
pub fn exhaust<I: IntoIterator>(items: I) {
    items.into_iter().for_each(drop);
}

/// [`exhaust`], returning how many items were discarded.
pub fn exhaust_count<I: IntoIterator>(items: I) -> usize {
    items.into_iter().fold(0, |n, _| n + 1)
}
