use redis::{Commands, Connection, RedisResult};
use std::sync::{Arc, Mutex};

/// Represents a Redis sorted set. Backs every range index
/// (`M:_zindex:<att>`): members are instance ids, scores are the field's
/// numeric encoding.
#[derive(Clone)]
pub struct RedisSortedSet {
    conn: Arc<Mutex<Connection>>,
}

impl RedisSortedSet {
    /// Creates a new `RedisSortedSet` over the provided connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Adds (or re-scores) a member.
    pub fn add(&self, key: &str, member: &str, score: f64) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.zadd(key, member, score)
    }

    /// Removes a member.
    pub fn remove(&self, key: &str, member: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.zrem(key, member)
    }

    /// The score of a member, if it is in the set.
    pub fn score(&self, key: &str, member: &str) -> RedisResult<Option<f64>> {
        let mut conn = self.conn.lock().unwrap();
        conn.zscore(key, member)
    }

    /// Zero-based ascending-order rank.
    pub fn rank(&self, key: &str, member: &str) -> RedisResult<Option<usize>> {
        let mut conn = self.conn.lock().unwrap();
        conn.zrank(key, member)
    }

    /// Zero-based descending-order rank.
    pub fn revrank(&self, key: &str, member: &str) -> RedisResult<Option<usize>> {
        let mut conn = self.conn.lock().unwrap();
        conn.zrevrank(key, member)
    }

    /// All members in ascending score order.
    pub fn members(&self, key: &str) -> RedisResult<Vec<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.zrange(key, 0, -1)
    }

    pub fn len(&self, key: &str) -> RedisResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        conn.zcard(key)
    }

    pub fn is_empty(&self, key: &str) -> RedisResult<bool> {
        Ok(self.len(key)? == 0)
    }

    pub fn del(&self, key: &str) -> RedisResult<()> {
        let mut conn = self.conn.lock().unwrap();
        conn.del(key)
    }

    /// `ZRANGEBYSCORE key min max`, with Redis's `(` exclusivity prefix
    /// convention already applied by the caller (see the `Endpoint`
    /// helpers below).
    pub fn range_by_score(&self, key: &str, min: &str, max: &str) -> RedisResult<Vec<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.zrangebyscore(key, min, max)
    }

    /// `ZRANGEBYSCORE key min max LIMIT offset count`.
    pub fn range_by_score_limit(
        &self,
        key: &str,
        min: &str,
        max: &str,
        offset: isize,
        count: isize,
    ) -> RedisResult<Vec<String>> {
        let mut conn = self.conn.lock().unwrap();
        conn.zrangebyscore_limit(key, min, max, offset, count)
    }

    /// `[-inf, (v)`: strictly less than `v`.
    pub fn lt(&self, key: &str, v: f64) -> RedisResult<Vec<String>> {
        self.range_by_score(key, "-inf", &format!("({}", v))
    }

    /// `[-inf, v]`: less than or equal to `v`.
    pub fn le(&self, key: &str, v: f64) -> RedisResult<Vec<String>> {
        self.range_by_score(key, "-inf", &v.to_string())
    }

    /// `((v), +inf]`: strictly greater than `v`.
    pub fn gt(&self, key: &str, v: f64) -> RedisResult<Vec<String>> {
        self.range_by_score(key, &format!("({}", v), "+inf")
    }

    /// `[v, +inf]`: greater than or equal to `v`.
    pub fn ge(&self, key: &str, v: f64) -> RedisResult<Vec<String>> {
        self.range_by_score(key, &v.to_string(), "+inf")
    }

    /// `[lo, hi]`: inclusive on both ends.
    pub fn between(&self, key: &str, lo: f64, hi: f64) -> RedisResult<Vec<String>> {
        self.range_by_score(key, &lo.to_string(), &hi.to_string())
    }

    /// Exact score match: `[v, v]`.
    pub fn eq(&self, key: &str, v: f64) -> RedisResult<Vec<String>> {
        self.range_by_score(key, &v.to_string(), &v.to_string())
    }
}
