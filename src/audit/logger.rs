//! Transaction logging.

use std::sync::Arc;

use bytes::Bytes;

use crate::audit::{AuditError, Operation, RecordFactory, TransactionRecord, TRANSACTIONS_PREFIX};
use crate::observability::metrics;
use crate::store::ObjectStore;

const CONTENT_TYPE: &str = "application/json";

/// Writes one JSON audit record per call.
#[derive(Clone)]
pub struct TransactionLogger {
    store: Arc<dyn ObjectStore>,
    factory: RecordFactory,
}

impl TransactionLogger {
    pub fn new(store: Arc<dyn ObjectStore>, factory: RecordFactory) -> Self {
        Self { store, factory }
    }

    /// Build a record for `payload` and write it once.
    pub async fn log(&self, operation: Operation, payload: &str) -> Result<TransactionRecord, AuditError> {
        let record = self.factory.new_record(operation, payload);
        let key = record.storage_key();
        let body = serde_json::to_vec(&record)?;

        let result = self.store.put(&key, Bytes::from(body), CONTENT_TYPE).await;
        metrics::record_store_put(TRANSACTIONS_PREFIX, result.is_ok());

        match result {
            Ok(()) => {
                tracing::info!(transaction_id = %record.id, key = %key, "Transaction logged");
                Ok(record)
            }
            Err(source) => Err(AuditError::Store { key, source }),
        }
    }
}
