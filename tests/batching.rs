use anyhow::Result;
use ironseq::testing::CountingIter;
use ironseq::*;

#[test]
fn batch_groups_with_short_tail() -> Result<()> {
    let groups: Vec<Vec<u32>> = batch(0..10, 4)?.collect();
    assert_eq!(groups, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9]]);
    Ok(())
}

#[test]
fn batch_exact_multiple_has_no_tail() -> Result<()> {
    let groups: Vec<Vec<u32>> = batch(0..9, 3)?.collect();
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| g.len() == 3));
    Ok(())
}

#[test]
fn batch_flattens_back_to_input() -> Result<()> {
    let input: Vec<u32> = (0..103).collect();
    for size in [2usize, 3, 8, 64, 128] {
        let flat: Vec<u32> = batch(input.clone(), size)?.flatten().collect();
        assert_eq!(flat, input, "size={size}");
    }
    Ok(())
}

#[test]
fn batch_of_empty_input_is_empty() -> Result<()> {
    let mut groups = batch(Vec::<u8>::new(), 5)?;
    assert_eq!(groups.next(), None);
    Ok(())
}

#[test]
fn batch_rejects_sizes_below_two() {
    for size in [0usize, 1] {
        let err = batch(0..10, size).unwrap_err();
        assert!(err.is_invalid_argument(), "size={size}: {err}");
    }
}

#[test]
fn batch_larger_than_input_yields_one_short_group() -> Result<()> {
    let groups: Vec<Vec<u32>> = batch(0..3, usize::MAX)?.collect();
    assert_eq!(groups, vec![vec![0, 1, 2]]);

    let groups: Vec<Vec<u64>> = batch(0..3u64, 1usize << 40)?.collect();
    assert_eq!(groups, vec![vec![0, 1, 2]]);

    let unsized_source = (0..10).filter(|x| x % 2 == 0);
    let groups: Vec<Vec<i32>> = batch(unsized_source, usize::MAX)?.collect();
    assert_eq!(groups, vec![vec![0, 2, 4, 6, 8]]);
    Ok(())
}

#[test]
fn batch_pulls_only_what_each_group_needs() -> Result<()> {
    let source = CountingIter::new(0..1_000_000);
    let pulls = source.counter();
    let mut groups = batch(source, 5)?;
    assert_eq!(pulls.get(), 0);
    groups.next();
    assert_eq!(pulls.get(), 5);
    groups.next();
    assert_eq!(pulls.get(), 10);
    Ok(())
}

#[test]
fn batch_size_hint_counts_groups() -> Result<()> {
    let groups = batch(0..10, 4)?;
    assert_eq!(groups.size(), 4);
    assert_eq!(groups.size_hint(), (3, Some(3)));
    Ok(())
}
