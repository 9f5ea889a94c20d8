//! S5 -- `date` is an indexed `DateTimeField`, so it answers both an
//! equality `filter(date=...)` and a range `zfilter(date__lt=...)`.

use chrono::{TimeZone, Utc};

use redisco::{Manager, Model, Value};

use crate::common::{flush_model, test_client, Post};

#[test]
#[ignore = "requires a live redis-compatible server"]
fn filter_and_zfilter_over_datetime_values() {
    let client = test_client();
    flush_model(&client, "Post");
    let posts = Manager::<Post>::new(client);

    let dates = [
        Utc.with_ymd_and_hms(2010, 1, 20, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2010, 2, 20, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2010, 1, 26, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2009, 12, 21, 1, 40, 0).unwrap(),
        Utc.with_ymd_and_hms(2010, 1, 10, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2010, 5, 20, 0, 0, 0).unwrap(),
    ];
    let mut ids = Vec::new();
    for (i, date) in dates.into_iter().enumerate() {
        let post = posts.create(Post::new(format!("post-{i}"), date)).unwrap();
        ids.push(post.id().unwrap().to_string());
    }

    let exact = posts
        .all()
        .filter("date", Utc.with_ymd_and_hms(2009, 12, 21, 1, 40, 0).unwrap())
        .unwrap()
        .exec()
        .unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].id(), Some(ids[3].as_str()));

    let threshold = Value::from(Utc.with_ymd_and_hms(2010, 1, 30, 0, 0, 0).unwrap())
        .numeric_score()
        .unwrap();
    let before_jan_30 = posts.all().zfilter_lt("date", threshold).unwrap().exec().unwrap();

    let mut matched: Vec<String> = before_jan_30
        .iter()
        .map(|p| p.id().unwrap().to_string())
        .collect();
    matched.sort();
    let mut expected = vec![
        ids[0].clone(),
        ids[2].clone(),
        ids[3].clone(),
        ids[4].clone(),
    ];
    expected.sort();
    assert_eq!(matched, expected);
}
