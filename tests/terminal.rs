use ironseq::*;
use std::cell::RefCell;

#[test]
fn exhaust_runs_upstream_side_effects() {
    let seen = RefCell::new(Vec::new());
    exhaust((0..5).inspect(|x| seen.borrow_mut().push(*x)));
    assert_eq!(seen.into_inner(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn exhaust_count_reports_items() {
    assert_eq!(exhaust_count(0..1234), 1234);
    assert_eq!(exhaust_count(Vec::<()>::new()), 0);
}

#[test]
fn exhaust_drives_lazy_pipeline_once() {
    let calls = RefCell::new(0);
    let mapped = (0..10).map(|x| {
        *calls.borrow_mut() += 1;
        x
    });
    exhaust(rolling_aggregate(mapped, |a, b| a + b));
    assert_eq!(*calls.borrow(), 10);
}
