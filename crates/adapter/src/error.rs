//! Common error types used across adapters
//!
//! These mirror the taxonomy the core ORM crate exposes to callers, but at
//! the transport layer: a `ConnectionError` or `OperationError` here becomes
//! an `OrmError::Storage` once it crosses into `redisco`.

use thiserror::Error;

/// A generic connection error
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to connect: {0}")]
    ConnectionFailed(String),

    #[error("connection timeout: {0}")]
    Timeout(String),

    #[error("invalid connection url: {0}")]
    InvalidUrl(String),
}

/// A generic operation error
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("invalid value format: {0}")]
    InvalidValue(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// A generic adapter error that combines connection and operation errors
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("operation error: {0}")]
    Operation(#[from] OperationError),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}
