//! redisco-adapter
//!
//! Typed, thin wrappers around the Redis primitives the redisco ORM engine
//! composes: strings/counters, hashes, sets, sorted sets and lists. Each
//! wrapper is a façade over the `redis` crate's synchronous `Connection` --
//! no query logic lives here, only the primitive commands the engine needs,
//! plus the handful of pipelined helpers the index engine relies on for
//! atomic-enough batched writes.

pub mod error;
pub mod redis;

pub use error::{AdapterError, ConnectionError, OperationError};
pub use redis::client::RedisClient;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
#[ctor::ctor]
fn init() {
    dotenv::dotenv().ok();
}
