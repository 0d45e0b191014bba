//! XML audit gateway library.
//!
//! Accepts XML payloads over `POST /insert`, `PUT /update` and
//! `DELETE /delete`, writes a JSON transaction record and the raw payload
//! to an object store, and answers with a status message.

pub mod audit;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use audit::{Operation, TransactionService, WritePolicy};
pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{MemoryStore, ObjectStore, S3Store};
