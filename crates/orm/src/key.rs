//! Deterministic hierarchical key builder.
//!
//! A `Key` is nothing but a `:`-joined path rooted at a model name: pure
//! data, no connection, no state. The query engine leans on this to name
//! its temporary result keys deterministically so two callers running the
//! same chain at once compute the same destination key rather than racing
//! to create distinct ones.

use std::fmt;

/// A hierarchical Redis key, e.g. `Person`, `Person:1`, `Person:1:_indices`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    /// Root a key at a model name, e.g. `Key::root("Person")` -> `Person`.
    pub fn root(name: &str) -> Self {
        Key(name.to_string())
    }

    /// Append a segment, e.g. `Person.segment("1")` -> `Person:1`.
    pub fn segment(&self, segment: impl fmt::Display) -> Key {
        Key(format!("{}:{}", self.0, segment))
    }

    /// The special `M:id` counter key.
    pub fn id_counter(&self) -> Key {
        self.segment("id")
    }

    /// The special `M:all` membership set key.
    pub fn all(&self) -> Key {
        self.segment("all")
    }

    /// The special `M:_zindex:<att>` range-index key.
    pub fn zindex(&self, attribute: &str) -> Key {
        self.segment("_zindex").segment(attribute)
    }

    /// The per-instance `M:<id>:_indices` bookkeeping key.
    pub fn indices_of(&self, id: &str) -> Key {
        self.segment(id).segment("_indices")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Key> for String {
    fn from(k: Key) -> String {
        k.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
