use redis::{Commands, Connection, RedisResult};
use std::sync::{Arc, Mutex};

use crate::error::{AdapterError, OperationError};

/// Represents a Redis set. Backs `M:all`, the per-instance `_indices`
/// bookkeeping set, and every equality-index auxiliary `M:<att>:<b64>`.
#[derive(Clone)]
pub struct RedisSet {
    conn: Arc<Mutex<Connection>>,
}

impl RedisSet {
    /// Creates a new `RedisSet` over the provided connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Adds a member to the set.
    pub fn add(&self, key: &str, member: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.sadd(key, member)
    }

    /// Removes a member; mirrors `set.remove` from the container spec,
    /// which raises `NotFound` when the element is absent.
    pub fn remove(&self, key: &str, member: &str) -> Result<(), AdapterError> {
        let mut conn = self.conn.lock().unwrap();
        let removed: usize = conn.srem(key, member)?;
        if removed == 0 {
            return Err(OperationError::KeyNotFound(member.to_string()).into());
        }
        Ok(())
    }

    /// Removes a member if present; never errors on absence.
    pub fn discard(&self, key: &str, member: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let _: usize = conn.srem(key, member)?;
        Ok(())
    }

    /// All members of the set.
    pub fn members(&self, key: &str) -> RedisResult<Vec<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.smembers(key)
    }

    /// Whether `member` is in the set.
    pub fn contains(&self, key: &str, member: &str) -> RedisResult<bool> {
        let mut conn = self.conn.lock().unwrap();
        conn.sismember(key, member)
    }

    /// Cardinality of the set.
    pub fn len(&self, key: &str) -> RedisResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        conn.scard(key)
    }

    pub fn is_empty(&self, key: &str) -> RedisResult<bool> {
        Ok(self.len(key)? == 0)
    }

    pub fn del(&self, key: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.del(key)
    }

    /// `SUNIONSTORE dest src[0] src[1] ...`, returning the destination key.
    pub fn union(&self, dest: &str, sources: &[&str]) -> RedisResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        conn.sunionstore(dest, sources)
    }

    /// `SINTERSTORE dest src[0] src[1] ...`, returning the destination key.
    /// This is the operation the query engine's equality-filter step uses.
    pub fn intersection(&self, dest: &str, sources: &[&str]) -> RedisResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        conn.sinterstore(dest, sources)
    }

    /// `SDIFFSTORE dest src[0] src[1] ...`, returning the destination key.
    pub fn difference(&self, dest: &str, sources: &[&str]) -> RedisResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        conn.sdiffstore(dest, sources)
    }

    /// Runs a function against a pipeline bound to this set's connection.
    /// Used by the index engine to batch the equality-index refresh into a
    /// single round trip.
    pub fn with_pipeline<F>(&self, f: F) -> RedisResult<()>
    where
        F: FnOnce(&mut redis::Pipeline),
    {
        let mut conn = self.conn.lock().unwrap();
        let mut pipe = redis::pipe();
        f(&mut pipe);
        pipe.query::<()>(&mut *conn)
    }
}
