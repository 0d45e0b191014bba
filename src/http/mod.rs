//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, limits)
//!     → request.rs (XML body extraction)
//!     → handlers.rs (one per operation, calls the audit service)
//!     → response.rs (JSON success / plain-text failure)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{XmlBody, X_REQUEST_ID};
pub use response::TransactionOutcome;
pub use server::{AppState, HttpServer};
