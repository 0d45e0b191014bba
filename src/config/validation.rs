//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the selected store backend has what it needs
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, StoreBackend};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("invalid store endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check a parsed configuration and collect every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let store = &config.store;
    if store.backend == StoreBackend::S3 {
        if store.bucket.trim().is_empty() {
            errors.push(ValidationError::Missing("store.bucket"));
        }
        if store.region.trim().is_empty() {
            errors.push(ValidationError::Missing("store.region"));
        }
        if store.access_key_id.is_empty() {
            errors.push(ValidationError::Missing("store.access_key_id"));
        }
        if store.secret_access_key.is_empty() {
            errors.push(ValidationError::Missing("store.secret_access_key"));
        }
        if let Some(endpoint) = &store.endpoint {
            match url::Url::parse(endpoint) {
                Ok(url) if url.has_host() => {}
                _ => errors.push(ValidationError::InvalidEndpoint(endpoint.clone())),
            }
        }
    }
    if store.timeout_secs == 0 {
        errors.push(ValidationError::Zero("store.timeout_secs"));
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_body_bytes"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
