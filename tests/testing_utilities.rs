use ironseq::testing::*;

#[test]
fn yields_passes_on_equal_sequences() {
    assert_yields(vec![1, 2, 3], [1, 2, 3]);
    assert_yields(Vec::<u8>::new(), []);
}

#[test]
#[should_panic(expected = "Sequence mismatch at index 1")]
fn yields_reports_first_difference() {
    assert_yields(vec![1, 9, 3], [1, 2, 3]);
}

#[test]
#[should_panic(expected = "Sequence length mismatch")]
fn yields_reports_length_difference() {
    assert_yields(vec![1, 2], [1, 2, 3]);
}

#[test]
fn unordered_respects_multiplicity() {
    assert_yields_unordered(vec!["b", "a", "b"], ["a", "b", "b"]);
}

#[test]
#[should_panic(expected = "Sequence content mismatch")]
fn unordered_rejects_different_multiplicity() {
    assert_yields_unordered(vec![1, 1, 2], [1, 2, 2]);
}

#[test]
fn predicates_over_sequences() {
    assert_all(0..10, |x| *x < 10);
    assert_none(0..10, |x| *x > 10);
}

#[test]
#[should_panic(expected = "Item at index 3 failed predicate")]
fn assert_all_names_failing_item() {
    assert_all(vec![2, 4, 6, 7], |x| x % 2 == 0);
}

#[test]
fn counting_iter_tracks_pulls_and_end() {
    let source = CountingIter::new(vec!['a', 'b']);
    let pulls = source.counter();
    let done = source.exhausted();
    let collected: String = source.collect();
    assert_eq!(collected, "ab");
    assert_eq!(pulls.get(), 2);
    assert!(done.get());
}
