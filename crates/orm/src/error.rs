//! Error taxonomy.
//!
//! A single `thiserror`-derived enum, the same shape as the adapter
//! crate's `AdapterError`: one variant per semantic kind the engine can
//! fail with, plus a transparent bridge from transport errors so callers
//! can `?` straight through save/delete/query execution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrmError {
    #[error("instance has no id yet (call save() first)")]
    MissingId,

    #[error("field `{0}` is not indexed")]
    AttributeNotIndexed(String),

    #[error("field validation failed: {0:?}")]
    FieldValidation(Vec<(String, String)>),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("type error on field `{field}`: expected {expected}, found `{found}`")]
    TypeError {
        field: String,
        expected: String,
        found: String,
    },

    #[error("storage error: {0}")]
    Storage(#[from] redis::RedisError),

    #[error("storage error: {0}")]
    Adapter(#[from] redisco_adapter::AdapterError),

    #[error("element not found")]
    NotFound,
}

impl OrmError {
    /// Attaches a field name to a `TypeError` raised without one (e.g. from
    /// `Value::from_storage`, which doesn't know which field it's decoding).
    pub fn with_field(self, field: &str) -> Self {
        match self {
            OrmError::TypeError {
                expected, found, ..
            } => OrmError::TypeError {
                field: field.to_string(),
                expected,
                found,
            },
            other => other,
        }
    }
}
