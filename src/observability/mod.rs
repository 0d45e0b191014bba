//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and store writers produce:
//!     → logging.rs (structured log events, request ID in spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
