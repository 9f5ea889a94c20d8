//! redisco
//!
//! A lightweight object-relational layer over a Redis-compatible
//! key/value store: typed model fields, equality and range indices
//! maintained entirely in Redis set algebra, and a chainable query engine
//! (`ModelSet`) that compiles `filter`/`zfilter`/`order`/`limit` chains
//! down to `SINTERSTORE`/`ZRANGEBYSCORE`/`SORT` pipelines.
//!
//! Built on `redisco-adapter`'s typed primitive wrappers the same way the
//! rest of this codebase layers an engine over a thin transport crate.

pub mod connection;
pub mod error;
pub mod field;
pub mod index;
pub mod key;
pub mod manager;
pub mod model;
pub mod query;
pub mod value;

pub use connection::{connect, connect_from_env, connect_url, default_client, RedisClient};
pub use error::OrmError;
pub use field::{FieldMeta, ListFieldMeta, ReferenceMeta};
pub use key::Key;
pub use manager::Manager;
pub use model::{Model, ModelMeta};
pub use query::{ModelSet, ZBound, ZOp};
pub use value::{Value, ValueKind};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
#[ctor::ctor]
fn init() {
    dotenv::dotenv().ok();
}
