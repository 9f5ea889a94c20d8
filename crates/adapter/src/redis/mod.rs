//! Redis adapter
//!
//! A synchronous client wrapper plus one typed façade per primitive data
//! type the ORM engine needs. Every façade shares the same connection
//! handle, so composing `client.hash()`, `client.set()`, etc. does not open
//! additional sockets.

pub mod client;
pub mod primitives;

pub use client::RedisClient;
pub use primitives::hash::RedisHash;
pub use primitives::list::RedisList;
pub use primitives::set::RedisSet;
pub use primitives::sort::SortQuery;
pub use primitives::sorted_set::RedisSortedSet;
pub use primitives::string::RedisString;
