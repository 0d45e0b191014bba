//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, loaded by the binary)
//!     → config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, load_config_or_default, ConfigError};
pub use schema::{
    AuditConfig, GatewayConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, StoreBackend,
    StoreConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
