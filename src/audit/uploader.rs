//! Raw payload upload.

use std::sync::Arc;

use bytes::Bytes;

use crate::audit::{upload_key, AuditError, UPLOADS_PREFIX};
use crate::observability::metrics;
use crate::store::ObjectStore;

const CONTENT_TYPE: &str = "application/xml";

/// Stores submitted payloads verbatim.
#[derive(Clone)]
pub struct PayloadUploader {
    store: Arc<dyn ObjectStore>,
}

impl PayloadUploader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Write `payload` once under `xml-uploads/<name>.xml`, returning the key.
    pub async fn upload(&self, payload: &str, name: &str) -> Result<String, AuditError> {
        let key = upload_key(name);
        let body = Bytes::copy_from_slice(payload.as_bytes());

        let result = self.store.put(&key, body, CONTENT_TYPE).await;
        metrics::record_store_put(UPLOADS_PREFIX, result.is_ok());

        match result {
            Ok(()) => {
                tracing::info!(key = %key, bytes = payload.len(), "File uploaded");
                Ok(key)
            }
            Err(source) => Err(AuditError::Store { key, source }),
        }
    }
}
