//! The index engine: keeps every auxiliary structure (`_indices`
//! bookkeeping set, equality-index sets, range-index sorted set)
//! consistent with instance state on every `save()`/`delete()`.
//!
//! Nothing here is exposed as a type; these are the two entry points the
//! `Model` trait's implementors call through, and the one helper
//! (`equality_aux_key`) the query engine reuses to compute the same
//! aux-key names for a `filter()` predicate.

use base64::{engine::general_purpose::STANDARD, Engine};

use redisco_adapter::RedisClient;

use crate::error::OrmError;
use crate::key::Key;
use crate::model::{Model, ModelMeta};
use crate::value::Value;

/// Standard base64, `\n` stripped -- the aux-key segment encoding (§4.E).
pub(crate) fn b64(value: &str) -> String {
    STANDARD.encode(value).replace('\n', "")
}

/// The equality-index key for one `(attribute, storage-value)` pair:
/// `M:<att>:<b64(value)>`. Shared by the index engine (to write it) and
/// the query engine (to read it) so they never compute it differently.
pub fn equality_aux_key(meta: &ModelMeta, attribute: &str, storage_value: &str) -> Key {
    meta.key().segment(attribute).segment(b64(storage_value))
}

/// Persists `instance`: allocates an id if new, writes its hash and list
/// fields, then refreshes every equality and range index. See §4.E.
pub fn save<T: Model>(instance: &mut T, client: &RedisClient) -> Result<(), OrmError> {
    let errors = instance.errors();
    if !errors.is_empty() {
        return Err(OrmError::FieldValidation(errors));
    }

    let meta = T::meta();
    let is_new = instance.id().is_none();
    instance.apply_auto_fields(is_new);

    if is_new {
        let id = client.string().incr(meta.key().id_counter().as_str())?;
        let id = id.to_string();
        client.set().add(meta.key().all().as_str(), &id)?;
        instance.set_id(id.clone());
        tracing::debug!(model = meta.name, id = %id, "allocated new id");
    }
    let id = instance
        .id()
        .expect("id is always Some after the new-instance branch above")
        .to_string();
    let instance_key = meta.key().segment(&id);

    let mut fields: Vec<(&str, String)> = Vec::new();
    for attribute in meta.attributes {
        let value = instance.attribute(attribute.name).unwrap_or(Value::Null);
        fields.push((attribute.name, value.to_storage()));
    }
    for reference in meta.references {
        let value = instance
            .attribute(reference.attname)
            .unwrap_or(Value::Null);
        fields.push((reference.attname, value.to_storage()));
    }
    for extra in meta.extra_indices {
        if !meta.is_plain_field(extra) {
            if let Some(value) = instance.extra_index_value(extra) {
                fields.push((extra, value));
            }
        }
    }
    client.hash().set_multiple(instance_key.as_str(), &fields)?;
    tracing::debug!(model = meta.name, id = %id, fields = fields.len(), "wrote instance hash");

    for list_field in meta.lists {
        let list_key = instance_key.segment(list_field.name);
        client.list().clear(list_key.as_str())?;
        if let Some(values) = instance.list(list_field.name) {
            if !values.is_empty() {
                client.list().extend(list_key.as_str(), values)?;
            }
        }
    }

    refresh_equality_indices(instance, client, &id)?;
    refresh_range_indices(instance, client, &id)?;

    Ok(())
}

/// Deletes `instance` and every auxiliary it participates in (§Invariant 4).
pub fn delete<T: Model>(instance: &mut T, client: &RedisClient) -> Result<(), OrmError> {
    let meta = T::meta();
    let Some(id) = instance.id().map(str::to_string) else {
        return Err(OrmError::MissingId);
    };
    let instance_key = meta.key().segment(&id);
    let indices_key = meta.key().indices_of(&id);

    let aux_keys = client.set().members(indices_key.as_str())?;
    client.set().with_pipeline(|pipe| {
        for aux in &aux_keys {
            pipe.cmd("SREM").arg(aux).arg(&id).ignore();
        }
        pipe.cmd("DEL").arg(indices_key.as_str()).ignore();
    })?;

    for field in meta.zindices() {
        client
            .sorted_set()
            .remove(meta.key().zindex(field).as_str(), &id)?;
    }
    for list_field in meta.lists {
        client
            .list()
            .clear(instance_key.segment(list_field.name).as_str())?;
    }
    client.hash().del(instance_key.as_str())?;
    client.set().discard(meta.key().all().as_str(), &id)?;

    tracing::debug!(model = meta.name, id = %id, removed_aux = aux_keys.len(), "deleted instance");
    Ok(())
}

fn refresh_equality_indices<T: Model>(
    instance: &T,
    client: &RedisClient,
    id: &str,
) -> Result<(), OrmError> {
    let meta = T::meta();
    let indices_key = meta.key().indices_of(id);
    let current = client.set().members(indices_key.as_str())?;

    let mut new_aux: Vec<String> = Vec::new();
    for name in meta.indices() {
        if let Some(list_field) = meta.list_field(name) {
            if let Some(values) = instance.list(list_field.name) {
                for element in values {
                    new_aux.push(equality_aux_key(meta, name, element).into());
                }
            }
            continue;
        }
        let storage = if let Some(attribute) = meta.attribute(name) {
            instance
                .attribute(attribute.name)
                .unwrap_or(Value::Null)
                .to_storage()
        } else if meta.reference_by_attname(name).is_some() {
            instance.attribute(name).unwrap_or(Value::Null).to_storage()
        } else {
            instance.extra_index_value(name).unwrap_or_default()
        };
        new_aux.push(equality_aux_key(meta, name, &storage).into());
    }

    client.set().with_pipeline(|pipe| {
        for aux in &current {
            pipe.cmd("SREM").arg(aux).arg(id).ignore();
        }
        pipe.cmd("DEL").arg(indices_key.as_str()).ignore();
        for aux in &new_aux {
            pipe.cmd("SADD").arg(aux).arg(id).ignore();
            pipe.cmd("SADD").arg(indices_key.as_str()).arg(aux).ignore();
        }
    })?;

    tracing::debug!(
        model = meta.name,
        id,
        removed = current.len(),
        added = new_aux.len(),
        "refreshed equality indices"
    );
    Ok(())
}

fn refresh_range_indices<T: Model>(
    instance: &T,
    client: &RedisClient,
    id: &str,
) -> Result<(), OrmError> {
    let meta = T::meta();
    for field in meta.attributes.iter().filter(|a| a.zindexed()) {
        let value = instance.attribute(field.name).unwrap_or(Value::Null);
        if let Some(score) = value.numeric_score() {
            client
                .sorted_set()
                .add(meta.key().zindex(field.name).as_str(), id, score)?;
        }
    }
    Ok(())
}
