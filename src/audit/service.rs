//! Per-request sequencing of the log and upload writes.

use std::sync::Arc;

use uuid::Uuid;

use crate::audit::{
    AuditError, Operation, PayloadUploader, RecordFactory, TransactionLogger, WritePolicy,
};
use crate::store::ObjectStore;

/// What was written for a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_id: Uuid,
    pub transaction_key: String,
    pub upload_key: String,
}

/// Records a transaction and uploads its payload.
#[derive(Clone)]
pub struct TransactionService {
    logger: TransactionLogger,
    uploader: PayloadUploader,
    factory: RecordFactory,
    policy: WritePolicy,
}

impl TransactionService {
    pub fn new(store: Arc<dyn ObjectStore>, factory: RecordFactory, policy: WritePolicy) -> Self {
        Self {
            logger: TransactionLogger::new(store.clone(), factory.clone()),
            uploader: PayloadUploader::new(store),
            factory,
            policy,
        }
    }

    /// Log `payload` as `operation`, then upload it.
    ///
    /// Under [`WritePolicy::ShortCircuit`] a failed log write returns before
    /// the upload is attempted. Under [`WritePolicy::Independent`] the upload
    /// runs regardless and both outcomes are reported.
    pub async fn process(&self, operation: Operation, payload: &str) -> Result<Receipt, AuditError> {
        let name = self.factory.upload_name(operation);

        match self.policy {
            WritePolicy::ShortCircuit => {
                let record = self.logger.log(operation, payload).await?;
                let upload_key = self.uploader.upload(payload, &name).await?;
                Ok(Receipt {
                    transaction_id: record.id,
                    transaction_key: record.storage_key(),
                    upload_key,
                })
            }
            WritePolicy::Independent => {
                let logged = self.logger.log(operation, payload).await;
                let uploaded = self.uploader.upload(payload, &name).await;
                match (logged, uploaded) {
                    (Ok(record), Ok(upload_key)) => Ok(Receipt {
                        transaction_id: record.id,
                        transaction_key: record.storage_key(),
                        upload_key,
                    }),
                    (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
                    (Err(log), Err(upload)) => Err(AuditError::Combined {
                        log: Box::new(log),
                        upload: Box::new(upload),
                    }),
                }
            }
        }
    }
}
