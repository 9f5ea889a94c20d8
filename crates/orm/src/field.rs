//! Field descriptors: the field-info table a model's [`crate::model::ModelMeta`]
//! is built from.
//!
//! The original implementation hangs this data off a descriptor object
//! installed per-attribute via Python's descriptor protocol (`__get__`/
//! `__set__`). There's no equivalent hook to attach to a Rust struct field
//! from outside its own `impl`, so this crate hoists the same data into a
//! plain, explicit table every concrete model hands back from
//! `Model::meta()` -- built once, read by the index and query engines.

use crate::value::ValueKind;

/// A scalar field: string, integer, float, boolean, datetime or date.
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta {
    pub name: &'static str,
    pub kind: ValueKind,
    /// Participates in the equality index (`M:<name>:<b64(value)>`).
    pub indexed: bool,
    /// Must be non-empty on `save()`.
    pub required: bool,
    /// `auto_now`: stamped with the current time on every save. Only
    /// meaningful for `DateTime`/`Date` kinds.
    pub auto_now: bool,
    /// `auto_now_add`: stamped only the first time the instance is saved.
    pub auto_now_add: bool,
}

impl FieldMeta {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        FieldMeta {
            name,
            kind,
            indexed: false,
            required: false,
            auto_now: false,
            auto_now_add: false,
        }
    }

    pub const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn auto_now(mut self) -> Self {
        self.auto_now = true;
        self
    }

    pub const fn auto_now_add(mut self) -> Self {
        self.auto_now_add = true;
        self
    }

    /// A range-indexable, indexed field additionally gets a `_zindex`
    /// sorted-set entry.
    pub fn zindexed(&self) -> bool {
        self.indexed && self.kind.is_range_indexable()
    }
}

/// A list field, stored as a Redis list at `<name>:<id>:<field>`.
#[derive(Debug, Clone, Copy)]
pub struct ListFieldMeta {
    pub name: &'static str,
    pub element_kind: ValueKind,
    /// Whether list membership participates in the equality index -- one
    /// auxiliary per element (§4.E).
    pub indexed: bool,
}

impl ListFieldMeta {
    pub const fn new(name: &'static str, element_kind: ValueKind) -> Self {
        ListFieldMeta {
            name,
            element_kind,
            indexed: false,
        }
    }

    pub const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

/// A reference field: `word: ReferenceField(Word)`. The stored attribute
/// is an id string at `attname` (default `<name>_id`).
#[derive(Debug, Clone, Copy)]
pub struct ReferenceMeta {
    pub name: &'static str,
    pub attname: &'static str,
    pub target_model: &'static str,
    pub required: bool,
    /// Whether `attname` participates in the equality index -- needed to
    /// answer reverse lookups (`Manager::referencing`) via `filter()`.
    pub indexed: bool,
}

impl ReferenceMeta {
    pub const fn new(name: &'static str, attname: &'static str, target_model: &'static str) -> Self {
        ReferenceMeta {
            name,
            attname,
            target_model,
            required: false,
            indexed: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}
