//! Transaction records and their construction.
//!
//! Every identifier and timestamp the service produces comes from a
//! [`RecordFactory`], which owns a [`Clock`] and an [`IdGenerator`].

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::Operation;

/// Prefix for transaction record keys.
pub const TRANSACTIONS_PREFIX: &str = "transactions/";

/// Prefix for uploaded document keys.
pub const UPLOADS_PREFIX: &str = "xml-uploads/";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of unique identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Audit-log envelope around a submitted payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    /// ISO-8601, millisecond precision, UTC (`2024-05-01T10:20:30.123Z`).
    pub timestamp: String,
    pub operation: Operation,
    pub data: String,
    #[serde(skip)]
    created_at_millis: i64,
}

impl TransactionRecord {
    /// Key this record is stored under.
    ///
    /// Only millisecond resolution: two records created in the same
    /// millisecond share a key.
    pub fn storage_key(&self) -> String {
        format!(
            "{}transaction-{}.json",
            TRANSACTIONS_PREFIX, self.created_at_millis
        )
    }

    pub fn created_at_millis(&self) -> i64 {
        self.created_at_millis
    }
}

/// Builds records and upload names from a pluggable clock and id source.
#[derive(Clone)]
pub struct RecordFactory {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl RecordFactory {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Wrap `payload` in a fresh record.
    pub fn new_record(&self, operation: Operation, payload: &str) -> TransactionRecord {
        let now = self.clock.now();
        TransactionRecord {
            id: self.ids.next_id(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            operation,
            data: payload.to_string(),
            created_at_millis: now.timestamp_millis(),
        }
    }

    /// Fresh document name, `<operation>-<uuid>`.
    pub fn upload_name(&self, operation: Operation) -> String {
        format!("{}-{}", operation, self.ids.next_id())
    }
}

impl Default for RecordFactory {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl std::fmt::Debug for RecordFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordFactory").finish_non_exhaustive()
    }
}

/// Key an uploaded document named `name` is stored under.
pub fn upload_key(name: &str) -> String {
    format!("{}{}.xml", UPLOADS_PREFIX, name)
}
