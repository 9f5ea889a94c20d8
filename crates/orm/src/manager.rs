//! The manager façade: `Model.objects` in the source, `Manager::<T>::new`
//! here.
//!
//! Rust has no descriptor protocol to make `.objects` behave differently
//! from a class versus an instance, so the "accessing `.objects` from an
//! instance fails" constraint is enforced structurally instead: `Manager`
//! is a type you construct explicitly from a client, not a field on a
//! model value.

use std::marker::PhantomData;

use redisco_adapter::RedisClient;

use crate::error::OrmError;
use crate::index;
use crate::model::Model;
use crate::query::{hydrate_instance, ModelSet};
use crate::value::Value;

/// Per-model entry point, bound to a client.
pub struct Manager<T: Model> {
    client: RedisClient,
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> Clone for Manager<T> {
    fn clone(&self) -> Self {
        Manager {
            client: self.client.clone(),
            _model: PhantomData,
        }
    }
}

impl<T: Model> Manager<T> {
    pub fn new(client: RedisClient) -> Self {
        Manager {
            client,
            _model: PhantomData,
        }
    }

    /// The unfiltered query over every live instance of `T`.
    pub fn all(&self) -> ModelSet<T> {
        ModelSet::new(self.client.clone())
    }

    pub fn filter(&self, field: &str, value: impl Into<Value>) -> Result<ModelSet<T>, OrmError> {
        self.all().filter(field, value)
    }

    pub fn order(&self, field: &str) -> ModelSet<T> {
        self.all().order(field)
    }

    pub fn limit(&self, count: isize, offset: isize) -> ModelSet<T> {
        self.all().limit(count, offset)
    }

    /// Saves `instance` (assigning it an id if new) and returns it.
    pub fn create(&self, mut instance: T) -> Result<T, OrmError> {
        index::save(&mut instance, &self.client)?;
        Ok(instance)
    }

    /// Persists a mutation to an existing (or new) instance in place.
    pub fn save(&self, instance: &mut T) -> Result<(), OrmError> {
        index::save(instance, &self.client)
    }

    /// Deletes an instance, enforcing Invariant 4.
    pub fn delete(&self, instance: &mut T) -> Result<(), OrmError> {
        index::delete(instance, &self.client)
    }

    /// `HGETALL M:<id>` plus list hydration, or `None` if the hash is
    /// absent.
    pub fn get_by_id(&self, id: &str) -> Result<Option<T>, OrmError> {
        hydrate_instance::<T>(&self.client, id)
    }

    /// Hydrates an instance from a full hash key (`M:<id>`), the Rust
    /// translation of the source's `from_key` helper.
    pub fn from_key(&self, full_key: &str) -> Result<Option<T>, OrmError> {
        let id = full_key.rsplit(':').next().unwrap_or(full_key);
        self.get_by_id(id)
    }

    /// The Rust stand-in for the dynamically-injected `<source_lower>_set`
    /// reverse property: every `T` whose reference attribute `attname`
    /// equals `id`.
    pub fn referencing(&self, attname: &str, id: &str) -> Result<ModelSet<T>, OrmError> {
        self.all().filter(attname, Value::String(id.to_string()))
    }
}
