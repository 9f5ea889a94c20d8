//! S6 -- a `ReferenceField` establishes an inverse lookup, exposed here as
//! `Manager::referencing` rather than a dynamically-injected
//! `<lower>_set` property (see Design Notes).

use redisco::{Manager, Model};

use crate::common::{flush_model, test_client, Character, Word};

#[test]
#[ignore = "requires a live redis-compatible server"]
fn reference_backlink_resolves_only_the_referencing_characters() {
    let client = test_client();
    flush_model(&client, "Word");
    flush_model(&client, "Character");
    let words = Manager::<Word>::new(client.clone());
    let characters = Manager::<Character>::new(client);

    let word = words.create(Word::new()).unwrap();
    let word_id = word.id().unwrap().to_string();

    characters
        .create(Character::new("a", Some(&word_id)))
        .unwrap();
    characters
        .create(Character::new("b", Some(&word_id)))
        .unwrap();
    characters
        .create(Character::new("c", Some(&word_id)))
        .unwrap();
    characters.create(Character::new("d", None)).unwrap();

    let backlink = characters
        .referencing("word_id", &word_id)
        .unwrap()
        .exec()
        .unwrap();

    assert_eq!(backlink.len(), 3);
    let names: Vec<&str> = backlink.iter().map(|c| c.name.as_str()).collect();
    for expected in ["a", "b", "c"] {
        assert!(names.contains(&expected));
    }
    assert!(!names.contains(&"d"));
}
