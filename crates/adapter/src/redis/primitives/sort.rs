use redis::{Connection, RedisResult};
use std::sync::{Arc, Mutex};

/// A builder around the Redis `SORT` command, covering the one shape the
/// query engine needs: sort a set by an external `BY` pattern (or by
/// nothing, i.e. numerically by element), optionally `ALPHA`/`DESC`,
/// optionally `LIMIT offset count`, always `STORE`d into a destination
/// list.
///
/// There is no typed wrapper for `SORT` in the `redis` crate's `Commands`
/// trait that covers the `BY ... STORE ...` combination cleanly, so this
/// builds the raw command the way the adapter's other primitives build
/// commands redis-rs doesn't expose a method for (e.g. `HRANDFIELD`,
/// `HINCRBYFLOAT`).
pub struct SortQuery<'a> {
    key: &'a str,
    by: Option<String>,
    alpha: bool,
    desc: bool,
    limit: Option<(isize, isize)>,
    store: &'a str,
}

impl<'a> SortQuery<'a> {
    /// Start a `SORT <key> ... STORE <store>` builder.
    pub fn new(key: &'a str, store: &'a str) -> Self {
        Self {
            key,
            by: None,
            alpha: false,
            desc: false,
            limit: None,
            store,
        }
    }

    /// `BY <pattern>`. A pattern containing no `*` disables sorting
    /// entirely (Redis treats it as "don't sort"), which is how the query
    /// engine asks for `SORT ... STORE ...` without an ordering while
    /// still wanting the `LIMIT`/materialize-into-a-list behavior.
    pub fn by(mut self, pattern: impl Into<String>) -> Self {
        self.by = Some(pattern.into());
        self
    }

    /// Lexicographic comparison instead of numeric.
    pub fn alpha(mut self) -> Self {
        self.alpha = true;
        self
    }

    /// Descending order.
    pub fn desc(mut self) -> Self {
        self.desc = true;
        self
    }

    /// `LIMIT offset count`.
    pub fn limit(mut self, offset: isize, count: isize) -> Self {
        self.limit = Some((offset, count));
        self
    }

    /// Executes the command, returning the number of elements stored.
    pub fn execute(self, conn: &Arc<Mutex<Connection>>) -> RedisResult<usize> {
        let mut cmd = redis::cmd("SORT");
        cmd.arg(self.key);
        if let Some(by) = &self.by {
            cmd.arg("BY").arg(by);
        }
        if let Some((offset, count)) = self.limit {
            cmd.arg("LIMIT").arg(offset).arg(count);
        }
        if self.alpha {
            cmd.arg("ALPHA");
        }
        if self.desc {
            cmd.arg("DESC");
        }
        cmd.arg("STORE").arg(self.store);
        let mut conn = conn.lock().unwrap();
        cmd.query(&mut *conn)
    }
}
