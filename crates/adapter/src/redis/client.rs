//! Redis client module
//!
//! Establishes and holds a single Redis connection behind a mutex, and
//! hands out typed primitive façades that share it.

use redis::{Client, Connection, RedisResult};
use std::sync::{Arc, Mutex};

use super::primitives::hash::RedisHash;
use super::primitives::list::RedisList;
use super::primitives::set::RedisSet;
use super::primitives::sorted_set::RedisSortedSet;
use super::primitives::string::RedisString;

/// A simple Redis client wrapper that manages a single connection.
#[derive(Clone)]
pub struct RedisClient {
    client: Arc<Client>,
    connection: Arc<Mutex<Connection>>,
}

impl RedisClient {
    /// Create a new Redis client from a connection string.
    ///
    /// # Example
    /// ```no_run
    /// # use redisco_adapter::redis::client::RedisClient;
    /// let client = RedisClient::from_url("redis://127.0.0.1:6379").unwrap();
    /// ```
    pub fn from_url(url: &str) -> RedisResult<Self> {
        let client = Client::open(url)?;
        let connection = client.get_connection()?;
        Ok(Self {
            client: Arc::new(client),
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Create a new Redis client from an existing client and connection.
    pub fn new(client: Client, connection: Connection) -> Self {
        Self {
            client: Arc::new(client),
            connection: Arc::new(Mutex::new(connection)),
        }
    }

    /// Get the raw Redis client.
    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }

    /// Get a new connection from the client, independent of the shared one.
    pub fn get_new_connection(&self) -> RedisResult<Connection> {
        self.client.get_connection()
    }

    /// Check if the connection is alive.
    pub fn ping(&self) -> RedisResult<bool> {
        let mut conn = self.connection.lock().unwrap();
        let pong: String = redis::cmd("PING").query(&mut *conn)?;
        Ok(pong == "PONG")
    }

    /// Get a `RedisString` primitive for string/counter operations.
    pub fn string(&self) -> RedisString {
        RedisString::new(self.connection.clone())
    }

    /// Get a `RedisSet` primitive for set operations.
    pub fn set(&self) -> RedisSet {
        RedisSet::new(self.connection.clone())
    }

    /// Get a `RedisHash` primitive for hash operations.
    pub fn hash(&self) -> RedisHash {
        RedisHash::new(self.connection.clone())
    }

    /// Get a `RedisSortedSet` primitive for sorted-set operations.
    pub fn sorted_set(&self) -> RedisSortedSet {
        RedisSortedSet::new(self.connection.clone())
    }

    /// Get a `RedisList` primitive for list operations.
    pub fn list(&self) -> RedisList {
        RedisList::new(self.connection.clone())
    }

    /// Run a raw command against the shared connection. Used by the query
    /// engine for the generic `SORT ... BY ... STORE ...` pipeline, which
    /// has no single-purpose typed wrapper.
    pub fn raw(&self) -> Arc<Mutex<Connection>> {
        self.connection.clone()
    }
}

/// Create a Redis client from a connection string.
pub fn create_client(url: &str) -> RedisResult<RedisClient> {
    RedisClient::from_url(url)
}
