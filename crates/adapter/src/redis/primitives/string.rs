use redis::{Commands, Connection, RedisResult};
use std::sync::{Arc, Mutex};

/// Represents a Redis string/counter with the handful of operations the ORM
/// engine needs: id allocation (`INCR`) and raw get/set/exists/del.
#[derive(Clone)]
pub struct RedisString {
    conn: Arc<Mutex<Connection>>,
}

impl RedisString {
    /// Creates a new `RedisString` over the provided connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Sets a key to hold the given string value.
    pub fn set(&self, key: &str, value: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.set(key, value)
    }

    /// Gets the string value of a key.
    pub fn get(&self, key: &str) -> RedisResult<Option<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.get(key)
    }

    /// Increments the counter at `key` by one, creating it at zero first.
    ///
    /// This is what the index engine uses to allocate the next id: `INCR`
    /// is atomic, so concurrent `save()` calls on different new instances
    /// never race for the same id.
    pub fn incr(&self, key: &str) -> RedisResult<i64> {
        let mut conn = self.conn.lock().unwrap();
        conn.incr(key, 1)
    }

    /// Deletes a key.
    pub fn del(&self, key: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.del(key)
    }

    /// Checks whether a key exists.
    pub fn exists(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.conn.lock().unwrap();
        conn.exists(key)
    }
}
