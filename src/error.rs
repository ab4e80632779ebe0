//! # Error Taxonomy
//!
//! Structured error handling for the enrichment engine.
//!
//! - [`PipelineError`]: the structured error value carried by a failing
//!   pipeline, orchestrator or enricher result (code + message + context).
//! - [`EdgeError`]: crate-level aggregate with `From` conversions from every
//!   module error, used by bootstrap and configuration code paths.
//!
//! Module-local errors live next to the code that raises them:
//! [`GatewayError`](crate::gateway::GatewayError),
//! [`RegistryError`](crate::registry::RegistryError),
//! [`ContextError`](crate::context::ContextError),
//! [`ConfigurationError`](crate::config::ConfigurationError) and
//! [`CacheError`](crate::cache::CacheError). Cache errors are logged where
//! they happen and never reach [`EdgeError`].

use crate::config::ConfigurationError;
use crate::context::ContextError;
use crate::gateway::GatewayError;
use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationFailed,
    Unauthorized,
    Forbidden,
    InternalError,
    GatewayError,
    /// Content exists but is not visible yet
    NotPublished,
    /// An upstream circuit is open
    ServiceUnavailable,
    ConfigurationError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::GatewayError => "GATEWAY_ERROR",
            ErrorCode::NotPublished => "NOT_PUBLISHED",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error value carried by failing pipeline results.
///
/// Immutable once built; [`PipelineError::with_context`] returns a new value.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct PipelineError {
    code: ErrorCode,
    message: String,
    #[serde(default)]
    context: BTreeMap<String, serde_json::Value>,
}

impl PipelineError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
            .with_context("resource", resource)
            .with_context("id", id)
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::Unauthorized, "Unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorCode::Forbidden, "Forbidden")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn gateway(service: &str, message: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::GatewayError,
            format!("Gateway error from {service}: {message}"),
        )
        .with_context("service", service)
    }

    pub fn not_published(id: &str) -> Self {
        Self::new(
            ErrorCode::NotPublished,
            format!("Editorial not published yet: {id}"),
        )
        .with_context("id", id)
    }

    pub fn circuit_open(service: &str) -> Self {
        Self::new(
            ErrorCode::ServiceUnavailable,
            format!("Service unavailable, circuit open: {service}"),
        )
        .with_context("service", service)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationError, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.context
    }

    /// Return a copy of this error with one more context entry
    #[must_use]
    pub fn with_context(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    /// Whether the boundary should answer with "service unavailable"
    pub fn is_unavailable(&self) -> bool {
        self.code == ErrorCode::ServiceUnavailable
    }
}

impl From<GatewayError> for PipelineError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::NotFound { resource, id } => PipelineError::not_found(&resource, &id),
            GatewayError::CircuitOpen { service } => PipelineError::circuit_open(&service),
            other => {
                let service = other.service().to_string();
                PipelineError::gateway(&service, other)
            }
        }
    }
}

impl From<RegistryError> for PipelineError {
    fn from(error: RegistryError) -> Self {
        PipelineError::configuration(error.to_string())
    }
}

impl From<ContextError> for PipelineError {
    fn from(error: ContextError) -> Self {
        PipelineError::internal(error.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(error: serde_json::Error) -> Self {
        PipelineError::internal(format!("JSON serialization error: {error}"))
    }
}

/// Crate-level error aggregate
#[derive(Debug, Error)]
pub enum EdgeError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Context error: {0}")]
    Context(#[from] ContextError),
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = std::result::Result<T, EdgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_resource_and_id() {
        let error = PipelineError::not_found("Editorial", "4433");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Editorial not found: 4433");
        assert_eq!(error.context()["resource"], "Editorial");
        assert_eq!(error.context()["id"], "4433");
    }

    #[test]
    fn test_with_context_leaves_original_untouched() {
        let base = PipelineError::internal("boom");
        let enriched = base.clone().with_context("enricher", "section");
        assert!(base.context().is_empty());
        assert_eq!(enriched.context()["enricher"], "section");
    }

    #[test]
    fn test_gateway_error_conversion_keeps_kinds_apart() {
        let open: PipelineError = GatewayError::CircuitOpen {
            service: "section".to_string(),
        }
        .into();
        assert!(open.is_unavailable());

        let transport: PipelineError = GatewayError::Transport {
            service: "section".to_string(),
            message: "connection reset".to_string(),
        }
        .into();
        assert_eq!(transport.code(), ErrorCode::GatewayError);
        assert!(!transport.is_unavailable());

        let missing: PipelineError = GatewayError::NotFound {
            resource: "section".to_string(),
            id: "12".to_string(),
        }
        .into();
        assert_eq!(missing.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_json_shape() {
        let error = PipelineError::gateway("tags", "timeout");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], "GATEWAY_ERROR");
        assert_eq!(json["message"], "Gateway error from tags: timeout");
        assert_eq!(json["context"]["service"], "tags");
    }
}
