//! Connection provider.
//!
//! `RedisClient` (from `redisco-adapter`) is always constructible
//! explicitly; nothing in the engine requires the process-wide registry
//! below. It exists purely as a convenience for callers who don't want to
//! thread a client through every model call, mirroring the adapter
//! crate's own `create_client` plus the core-crate's process-wide default
//! pattern, translated to a synchronous `OnceLock`.

use std::sync::{Mutex, OnceLock};

pub use redisco_adapter::RedisClient;

use crate::error::OrmError;

static DEFAULT_CLIENT: OnceLock<Mutex<Option<RedisClient>>> = OnceLock::new();

fn registry() -> &'static Mutex<Option<RedisClient>> {
    DEFAULT_CLIENT.get_or_init(|| Mutex::new(None))
}

/// Connects to `redis://<host>:<port>/<db>` and installs it as the
/// process-wide default client. Re-invoking with different settings
/// replaces the client; with identical settings it's idempotent in effect
/// (a fresh connection is still opened, but it points at the same place).
pub fn connect(host: &str, port: u16, db: i64) -> Result<RedisClient, OrmError> {
    connect_url(&format!("redis://{host}:{port}/{db}"))
}

/// Connects from a full Redis URL and installs it as the process-wide
/// default client.
pub fn connect_url(url: &str) -> Result<RedisClient, OrmError> {
    let client = RedisClient::from_url(url)?;
    *registry().lock().unwrap() = Some(client.clone());
    tracing::debug!(url, "installed default redis client");
    Ok(client)
}

/// Convenience for tests and examples: connects using `REDIS_URL` from the
/// environment, falling back to `redis://127.0.0.1:6379`.
pub fn connect_from_env() -> Result<RedisClient, OrmError> {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    connect_url(&url)
}

/// The process-wide default client installed by a prior `connect*` call,
/// if any. A model's own `Meta.db` override (see [`crate::model::Model`])
/// always takes precedence over this when both are present.
pub fn default_client() -> Option<RedisClient> {
    registry().lock().unwrap().clone()
}
