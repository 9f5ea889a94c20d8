//! Model meta-registration and the `Model` trait every record type
//! implements.
//!
//! The source collects `_attributes`/`_indices`/`_zindices`/etc on a class
//! object once, at class-definition time, via a metaclass. A systems
//! language has no metaclass hook, so this crate hoists the same
//! registration to a `Model::meta() -> &'static ModelMeta` associated
//! function: plain data, built once per concrete type (typically behind a
//! `OnceLock` in the implementation), read by the index engine (`save`,
//! `delete`) and the query engine (`ModelSet`) alike.

use crate::error::OrmError;
use crate::field::{FieldMeta, ListFieldMeta, ReferenceMeta};
use crate::key::Key;
use crate::value::Value;

/// The field table for one model type: everything the index and query
/// engines need that isn't instance data.
pub struct ModelMeta {
    pub name: &'static str,
    pub attributes: &'static [FieldMeta],
    pub lists: &'static [ListFieldMeta],
    pub references: &'static [ReferenceMeta],
    /// Extra equality-indexed names not already an attribute or list --
    /// method-derived indices declared in `Meta.indices` (e.g. `full_name`,
    /// `percent`). Evaluated via `Model::extra_index_value`.
    pub extra_indices: &'static [&'static str],
}

impl ModelMeta {
    /// The model's key namespace root, `K(name)`.
    pub fn key(&self) -> Key {
        Key::root(self.name)
    }

    /// Every equality-indexed name: indexed scalars, indexed list fields,
    /// plus the method-derived extras.
    pub fn indices(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = self
            .attributes
            .iter()
            .filter(|a| a.indexed)
            .map(|a| a.name)
            .collect();
        out.extend(self.lists.iter().filter(|l| l.indexed).map(|l| l.name));
        out.extend(
            self.references
                .iter()
                .filter(|r| r.indexed)
                .map(|r| r.attname),
        );
        out.extend(self.extra_indices.iter().copied());
        out
    }

    /// Every range-indexable, indexed scalar name.
    pub fn zindices(&self) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.zindexed())
            .map(|a| a.name)
            .collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&FieldMeta> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn list_field(&self, name: &str) -> Option<&ListFieldMeta> {
        self.lists.iter().find(|l| l.name == name)
    }

    pub fn reference(&self, name: &str) -> Option<&ReferenceMeta> {
        self.references.iter().find(|r| r.name == name)
    }

    pub fn reference_by_attname(&self, attname: &str) -> Option<&ReferenceMeta> {
        self.references.iter().find(|r| r.attname == attname)
    }

    /// Whether `name` is an attribute or list field already -- used by the
    /// index engine to decide whether an extra index name needs evaluating
    /// as a method rather than read directly off the hash fields.
    pub fn is_plain_field(&self, name: &str) -> bool {
        self.attribute(name).is_some() || self.list_field(name).is_some()
    }
}

/// The contract every record type implements. Analogous to the source's
/// `Model` base class, minus the parts Rust has no runtime hook for
/// (descriptor-driven attribute access, dynamic reverse properties): those
/// become explicit methods here instead.
pub trait Model: Sized + Clone {
    /// The static field table for this type. Implementations typically
    /// build this once behind a `OnceLock` and return a `'static`
    /// reference to it.
    fn meta() -> &'static ModelMeta;

    /// The assigned id, or `None` if this instance has never been saved.
    fn id(&self) -> Option<&str>;

    /// Assigns an id. Called once, by `save()`, the first time an instance
    /// is persisted. Never called again afterwards (ids are immutable).
    fn set_id(&mut self, id: String);

    /// Reads a scalar attribute by name (including reference id
    /// attributes, which are plain `Value::String` ids).
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Writes a scalar attribute by name, type-checked against the
    /// field's declared `ValueKind`.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), OrmError>;

    /// Reads a list field's current in-memory values.
    fn list(&self, name: &str) -> Option<&[String]>;

    /// Replaces a list field's in-memory values.
    fn set_list(&mut self, name: &str, values: Vec<String>);

    /// Identity comparison matching the source's `Model.__eq__`/`__hash__`:
    /// two instances are the same record iff they share a model type and a
    /// full key (`M:<id>`). An unsaved instance (no id) is never identical
    /// to anything, including another unsaved instance of the same type --
    /// compare field values directly before either side has been saved.
    fn same_identity(&self, other: &Self) -> bool {
        matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
    }

    /// Evaluates a method-derived extra index (e.g. `full_name`,
    /// `percent`) declared in `_indices` that is not a plain attribute or
    /// list. The default implementation has nothing to evaluate; models
    /// that declare extra indices override this.
    fn extra_index_value(&self, _name: &str) -> Option<String> {
        None
    }

    /// User-overridable validation, run in addition to the built-in
    /// per-field checks. Returns `(field, reason)` pairs.
    fn validate_custom(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Applies `auto_now`/`auto_now_add` field semantics just before
    /// encoding for storage. The default implementation does nothing;
    /// models with such fields override this to stamp them.
    fn apply_auto_fields(&mut self, _is_new: bool) {}

    /// Hydrates an instance from a fully-loaded hash plus list fields
    /// (e.g. from `HGETALL` + `LRANGE`). Used by `get_by_id`, query
    /// materialization, and `from_key`.
    fn from_hydration(
        id: String,
        fields: &std::collections::HashMap<String, String>,
        lists: &std::collections::HashMap<String, Vec<String>>,
    ) -> Result<Self, OrmError>;

    /// Built-in structural validation: required-ness and type-consistency
    /// of every declared scalar attribute, plus reference attributes.
    /// Aggregated with `validate_custom` by `is_valid`.
    fn validate_builtin(&self) -> Vec<(String, String)> {
        let meta = Self::meta();
        let mut errors = Vec::new();
        for field in meta.attributes {
            match self.attribute(field.name) {
                Some(Value::Null) | None => {
                    if field.required {
                        errors.push((field.name.to_string(), "is required".to_string()));
                    }
                }
                Some(v) => {
                    if v.kind() != field.kind {
                        errors.push((
                            field.name.to_string(),
                            format!("expected {}, found {}", field.kind, v.kind()),
                        ));
                    }
                }
            }
        }
        for reference in meta.references {
            let present = self
                .attribute(reference.attname)
                .map(|v| matches!(v, Value::String(s) if !s.is_empty()))
                .unwrap_or(false);
            if reference.required && !present {
                errors.push((reference.name.to_string(), "is required".to_string()));
            }
        }
        errors
    }

    /// Aggregates built-in and user validation. `save()` calls this and
    /// fails with `FieldValidation` if it's non-empty.
    fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    fn errors(&self) -> Vec<(String, String)> {
        let mut errors = self.validate_builtin();
        errors.extend(self.validate_custom());
        errors
    }
}
