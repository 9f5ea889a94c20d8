use redis::{Commands, Connection, RedisResult};
use std::sync::{Arc, Mutex};

/// Represents a Redis list. Backs list-typed fields (`M:<id>:<field>`) and
/// the `SORT ... STORE ...` destination the query engine reads ordered
/// results back from.
#[derive(Clone)]
pub struct RedisList {
    conn: Arc<Mutex<Connection>>,
}

impl RedisList {
    /// Creates a new `RedisList` over the provided connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Appends a value to the right of the list.
    pub fn append(&self, key: &str, value: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.rpush(key, value)
    }

    /// Same as `append` (kept separate for readability at call sites that
    /// mean "push", matching the container contract's `push` alias).
    pub fn push(&self, key: &str, value: &str) -> RedisResult<()> {
        self.append(key, value)
    }

    /// Appends every element of `values`, preserving order.
    pub fn extend(&self, key: &str, values: &[String]) -> RedisResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock().unwrap();
        conn.rpush(key, values)
    }

    /// Removes and returns the rightmost element.
    pub fn pop(&self, key: &str) -> RedisResult<Option<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.rpop(key, None)
    }

    /// Removes and returns the leftmost element.
    pub fn shift(&self, key: &str) -> RedisResult<Option<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.lpop(key, None)
    }

    /// Pushes a value onto the left of the list.
    pub fn unshift(&self, key: &str, value: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.lpush(key, value)
    }

    /// Element at a zero-based index, negative indices counting from the
    /// end, matching `LINDEX` semantics.
    pub fn index(&self, key: &str, index: isize) -> RedisResult<Option<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.lindex(key, index)
    }

    /// `LRANGE key start stop` slice.
    pub fn slice(&self, key: &str, start: isize, stop: isize) -> RedisResult<Vec<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.lrange(key, start, stop)
    }

    /// All members in order.
    pub fn members(&self, key: &str) -> RedisResult<Vec<String>> {
        self.slice(key, 0, -1)
    }

    /// Trims the list to the `[start, stop]` range in place.
    pub fn trim(&self, key: &str, start: isize, stop: isize) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.ltrim(key, start, stop)
    }

    pub fn len(&self, key: &str) -> RedisResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        conn.llen(key)
    }

    pub fn is_empty(&self, key: &str) -> RedisResult<bool> {
        Ok(self.len(key)? == 0)
    }

    /// Deletes the list key entirely, as opposed to emptying it via
    /// repeated pops -- the container contract's `clear`.
    pub fn clear(&self, key: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.del(key)
    }
}
