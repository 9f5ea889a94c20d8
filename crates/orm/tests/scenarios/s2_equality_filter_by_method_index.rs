//! S2 -- `full_name` is a method-derived equality index
//! (`Meta.indices = ['full_name']` in the original); filtering on it
//! should narrow to the exact match among three Persons sharing a first
//! name.

use redisco::Manager;

use crate::common::{flush_model, test_client, Person};

#[test]
#[ignore = "requires a live redis-compatible server"]
fn filter_by_method_derived_index_matches_exact_full_name() {
    let client = test_client();
    flush_model(&client, "Person");
    let people = Manager::<Person>::new(client);

    people.create(Person::new("Granny", "Goose")).unwrap();
    people.create(Person::new("Granny", "Mommy")).unwrap();
    people.create(Person::new("Granny", "Kent")).unwrap();
    people.create(Person::new("Clark", "Kent")).unwrap();

    let matches = people
        .filter("full_name", "Granny Mommy")
        .unwrap()
        .exec()
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].full_name(), "Granny Mommy");
}
