//! Audit subsystem: transaction records and payload uploads.
//!
//! # Data Flow
//! ```text
//! handler (operation, raw text)
//!     → service.rs (sequence the writes under a WritePolicy)
//!     → logger.rs  → transactions/transaction-<millis>.json
//!     → uploader.rs → xml-uploads/<operation>-<uuid>.xml
//! ```
//!
//! # Design Decisions
//! - Records and documents are write-once and never read back
//! - The two writes share no key; a failure after the first write leaves it
//!   in place
//! - Ids and timestamps come from `RecordFactory` only

pub mod logger;
pub mod operation;
pub mod record;
pub mod service;
pub mod uploader;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

pub use logger::TransactionLogger;
pub use operation::Operation;
pub use record::{
    upload_key, Clock, IdGenerator, RecordFactory, SystemClock, TransactionRecord, UuidGenerator,
    TRANSACTIONS_PREFIX, UPLOADS_PREFIX,
};
pub use service::{Receipt, TransactionService};
pub use uploader::PayloadUploader;

/// How the payload upload depends on the transaction log write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// A failed log write skips the upload entirely.
    #[default]
    ShortCircuit,
    /// Both writes are attempted; any failure fails the request.
    Independent,
}

/// Errors raised while recording a transaction.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to serialize transaction record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write '{key}': {source}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("transaction log failed ({log}); upload failed ({upload})")]
    Combined {
        log: Box<AuditError>,
        upload: Box<AuditError>,
    },
}
