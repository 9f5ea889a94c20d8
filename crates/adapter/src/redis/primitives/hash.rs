use redis::{Commands, Connection, RedisResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Represents a Redis hash: the storage form of a model instance
/// (`M:<id>`), and of nothing else in this engine.
#[derive(Clone)]
pub struct RedisHash {
    conn: Arc<Mutex<Connection>>,
}

impl RedisHash {
    /// Creates a new `RedisHash` over the provided connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Gets a single field.
    pub fn get(&self, key: &str, field: &str) -> RedisResult<Option<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.hget(key, field)
    }

    /// Sets a single field.
    pub fn set(&self, key: &str, field: &str, value: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.hset(key, field, value)
    }

    /// Sets multiple fields in one round trip (`HMSET`/`HSET` multi-field).
    pub fn set_multiple(&self, key: &str, fields: &[(&str, String)]) -> RedisResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock().unwrap();
        let pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        conn.hset_multiple(key, &pairs)
    }

    /// Gets every field/value pair.
    pub fn all(&self, key: &str) -> RedisResult<HashMap<String, String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.hgetall(key)
    }

    /// Gets all field names.
    pub fn keys(&self, key: &str) -> RedisResult<Vec<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.hkeys(key)
    }

    /// Gets all values, in the same order as `keys`.
    pub fn values(&self, key: &str) -> RedisResult<Vec<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.hvals(key)
    }

    /// Number of fields.
    pub fn len(&self, key: &str) -> RedisResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        conn.hlen(key)
    }

    pub fn is_empty(&self, key: &str) -> RedisResult<bool> {
        Ok(self.len(key)? == 0)
    }

    /// Whether a field exists.
    pub fn contains(&self, key: &str, field: &str) -> RedisResult<bool> {
        let mut conn = self.conn.lock().unwrap();
        conn.hexists(key, field)
    }

    /// Deletes the whole hash key.
    pub fn del(&self, key: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.del(key)
    }

    /// Whether the hash key exists at all.
    pub fn exists(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.conn.lock().unwrap();
        conn.exists(key)
    }
}
