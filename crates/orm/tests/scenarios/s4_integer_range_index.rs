//! S4 -- `score` is an indexed `IntegerField` backing a range index;
//! `order('score')` sorts numerically and `zfilter(score__in=(lo, hi))`
//! is inclusive on both ends.

use redisco::Manager;

use crate::common::{flush_model, test_client, Exam};

#[test]
#[ignore = "requires a live redis-compatible server"]
fn zfilter_in_is_inclusive_and_order_sorts_numerically() {
    let client = test_client();
    flush_model(&client, "Exam");
    let exams = Manager::<Exam>::new(client);

    for score in [9, 99, 75, 33, 95] {
        exams.create(Exam::new(score, 100)).unwrap();
    }

    let ordered = exams.all().order("score").exec().unwrap();
    let scores: Vec<i64> = ordered.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![9, 33, 75, 95, 99]);

    let in_range = exams
        .all()
        .zfilter_in("score", 10.0, 96.0)
        .unwrap()
        .exec()
        .unwrap();
    assert_eq!(in_range.len(), 3);
}
