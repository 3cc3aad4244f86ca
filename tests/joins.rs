use anyhow::{anyhow, Result};
use ironseq::testing::CountingIter;
use ironseq::*;

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: u32,
    name: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
struct Order {
    user_id: u32,
    total: u32,
}

#[test]
fn inner_join_pairs_matching_keys_in_left_order() {
    let orders = vec![
        Order { user_id: 2, total: 10 },
        Order { user_id: 9, total: 99 },
        Order { user_id: 1, total: 5 },
        Order { user_id: 2, total: 7 },
    ];
    let users = vec![User { id: 1, name: "ada" }, User { id: 2, name: "bob" }];

    let joined: Vec<(u32, &str)> = inner_join(orders, users, |o| o.user_id, |u| u.id)
        .map(|(o, u)| (o.total, u.name))
        .collect();
    assert_eq!(joined, vec![(10, "bob"), (5, "ada"), (7, "bob")]);
}

#[test]
fn duplicate_right_keys_keep_the_last() {
    let left = vec![1, 2];
    let right = vec![(1, "first"), (2, "only"), (1, "second")];
    let joined: Vec<_> = inner_join(left, right, |l| *l, |r| r.0).collect();
    assert_eq!(joined, vec![(1, (1, "second")), (2, (2, "only"))]);
}

#[test]
fn empty_sides_join_to_nothing() {
    let joined: Vec<(u8, u8)> = inner_join(Vec::<u8>::new(), vec![1u8], |l| *l, |r| *r).collect();
    assert!(joined.is_empty());
    let joined: Vec<(u8, u8)> = inner_join(vec![1u8], Vec::<u8>::new(), |l| *l, |r| *r).collect();
    assert!(joined.is_empty());
}

#[test]
fn right_is_indexed_eagerly_and_left_streamed() {
    let left = CountingIter::new(0..1_000);
    let left_pulls = left.counter();
    let right = CountingIter::new((0..10).map(|k| k * 100));
    let right_pulls = right.counter();

    let mut joined = inner_join(left, right, |l| *l, |r| *r);
    assert_eq!(right_pulls.get(), 10);
    assert_eq!(left_pulls.get(), 0);
    assert_eq!(joined.indexed(), 10);

    assert_eq!(joined.next(), Some((0, 0)));
    assert_eq!(joined.next(), Some((100, 100)));
    assert_eq!(left_pulls.get(), 101);
}

#[test]
fn try_inner_join_reports_left_key_failure() {
    let left = vec!["1", "x", "2"];
    let right = vec![(1, 'a'), (2, 'b')];
    let joined: Vec<_> = try_inner_join(
        left,
        right,
        |l: &&str| l.parse::<i32>().map_err(|e| anyhow!("bad left key {l}: {e}")),
        |r: &(i32, char)| Ok(r.0),
    )
    .unwrap()
    .collect();
    assert_eq!(joined.len(), 2);
    assert_eq!(joined[0].as_ref().ok(), Some(&("1", (1, 'a'))));
    assert!(joined[1].as_ref().is_err_and(Error::is_callback));
}

#[test]
fn try_inner_join_fails_fast_on_right_key() {
    let result = try_inner_join(
        vec![1],
        vec![1, 2, 3],
        |l: &i32| Ok(*l),
        |r: &i32| if *r == 2 { Err(anyhow!("boom")) } else { Ok(*r) },
    );
    let err = result.err().expect("right side error");
    assert!(err.is_callback());
}

#[test]
fn try_inner_join_success_path() -> Result<()> {
    let joined = try_inner_join(
        vec![3, 1],
        vec![1, 2, 3],
        |l: &i32| Ok::<_, anyhow::Error>(*l),
        |r: &i32| Ok(*r),
    )?
    .collect::<ironseq::Result<Vec<_>>>()?;
    assert_eq!(joined, vec![(3, 3), (1, 1)]);
    Ok(())
}
