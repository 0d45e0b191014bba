//! Object store subsystem.
//!
//! # Data Flow
//! ```text
//! audit logger / uploader
//!     → ObjectStore::put(key, body, content_type)
//!     → s3.rs (signed PUT over HTTPS, see sigv4.rs)
//!       or memory.rs (process-local map)
//! ```
//!
//! # Design Decisions
//! - The store is injected as `Arc<dyn ObjectStore>`; nothing reaches for a
//!   global client
//! - Exactly one attempt per call; retries are the caller's business
//! - Writes to an existing key overwrite it (last-write-wins)

pub mod memory;
pub mod s3;
pub mod sigv4;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};

pub use memory::{MemoryStore, StoredObject};
pub use s3::S3Store;

/// Errors reported by an object store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request could not be built from the given inputs.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The store refused to accept writes.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Minimal capability this service needs from a blob store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `body` under `key`, replacing anything already stored there.
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError>;
}

/// Construct the store selected by `config.backend`.
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn ObjectStore>, StoreError> {
    match config.backend {
        StoreBackend::S3 => {
            let store = S3Store::from_config(config)?;
            tracing::info!(
                bucket = %config.bucket,
                region = %config.region,
                endpoint = ?config.endpoint,
                "S3 store configured"
            );
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; objects are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
