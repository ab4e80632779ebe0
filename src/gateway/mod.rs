//! # Gateway Ports
//!
//! One port per upstream domain. Transport implementations live outside this
//! crate; the pipeline only sees `Arc<dyn Gateway<..>>` trait objects, usually
//! wrapped by the decorators in [`decorators`].
//!
//! A port answers `Ok(None)` for "no such record" when the upstream reports an
//! absence, and `Err(GatewayError::NotFound)` when the caller asked for
//! something that must exist. Neither counts against a circuit breaker.

pub mod decorators;
pub mod memory;

use crate::models::{
    CommentCount, Editorial, Journalist, MembershipQuery, Multimedia, Photo, Section, Tag,
    Widget,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use memory::InMemoryGateway;

/// Errors surfaced by gateway implementations and decorators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("{service} transport error: {message}")]
    Transport { service: String, message: String },

    #[error("{service} timed out after {elapsed_ms}ms")]
    Timeout { service: String, elapsed_ms: u64 },

    #[error("{service} returned an undecodable payload: {message}")]
    Decode { service: String, message: String },

    /// Fast-fail signal; the inner gateway was not called
    #[error("{service} unavailable: circuit open")]
    CircuitOpen { service: String },
}

impl GatewayError {
    pub fn transport(service: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn service(&self) -> &str {
        match self {
            Self::NotFound { resource, .. } => resource,
            Self::Transport { service, .. }
            | Self::Timeout { service, .. }
            | Self::Decode { service, .. }
            | Self::CircuitOpen { service } => service,
        }
    }

    /// Whether this error counts as an upstream failure for a circuit breaker
    pub fn trips_breaker(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Decode { .. }
        )
    }

    pub fn is_circuit_open(&self) -> bool {
        matches!(self, Self::CircuitOpen { .. })
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Deterministic cache key derivation for a gateway's identifying argument
pub trait GatewayKey {
    fn cache_key(&self) -> String;
}

impl GatewayKey for str {
    fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl GatewayKey for String {
    fn cache_key(&self) -> String {
        self.clone()
    }
}

/// Port onto one upstream domain
#[async_trait]
pub trait Gateway: Send + Sync {
    type Key: GatewayKey + Send + Sync + ?Sized;
    type Item: Clone + Send + Sync + 'static;

    /// Upstream name, used for cache keys, breaker names and logging
    fn resource(&self) -> &str;

    /// Blocking lookup
    fn find_by_id(&self, id: &Self::Key) -> GatewayResult<Option<Self::Item>>;

    async fn find_by_id_async(&self, id: &Self::Key) -> GatewayResult<Option<Self::Item>>;
}

#[async_trait]
impl<G> Gateway for Arc<G>
where
    G: Gateway + ?Sized,
{
    type Key = G::Key;
    type Item = G::Item;

    fn resource(&self) -> &str {
        (**self).resource()
    }

    fn find_by_id(&self, id: &Self::Key) -> GatewayResult<Option<Self::Item>> {
        (**self).find_by_id(id)
    }

    async fn find_by_id_async(&self, id: &Self::Key) -> GatewayResult<Option<Self::Item>> {
        (**self).find_by_id_async(id).await
    }
}

pub type EditorialGateway = dyn Gateway<Key = str, Item = Editorial>;
pub type SectionGateway = dyn Gateway<Key = str, Item = Section>;
pub type MultimediaGateway = dyn Gateway<Key = str, Item = Multimedia>;
pub type PhotoGateway = dyn Gateway<Key = str, Item = Photo>;
pub type TagGateway = dyn Gateway<Key = str, Item = Tag>;
pub type JournalistGateway = dyn Gateway<Key = str, Item = Journalist>;
pub type CommentsGateway = dyn Gateway<Key = str, Item = CommentCount>;
pub type WidgetGateway = dyn Gateway<Key = str, Item = Widget>;
/// Resolves membership card links to their subscription URLs, in input order
pub type MembershipGateway = dyn Gateway<Key = MembershipQuery, Item = Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_upstream_failures_trip_breaker() {
        assert!(GatewayError::transport("tags", "reset").trips_breaker());
        assert!(GatewayError::Timeout {
            service: "tags".to_string(),
            elapsed_ms: 500
        }
        .trips_breaker());
        assert!(!GatewayError::not_found("tag", "1").trips_breaker());
        assert!(!GatewayError::CircuitOpen {
            service: "tags".to_string()
        }
        .trips_breaker());
    }

    #[test]
    fn test_service_name_per_kind() {
        assert_eq!(GatewayError::not_found("section", "9").service(), "section");
        assert_eq!(
            GatewayError::Decode {
                service: "photo".to_string(),
                message: "eof".to_string()
            }
            .service(),
            "photo"
        );
    }

    #[tokio::test]
    async fn test_arc_forwarding() {
        let inner = Arc::new(InMemoryGateway::<str, Tag>::new("tag"));
        inner.insert(
            "t1",
            Tag {
                id: "t1".to_string(),
                name: "Rust".to_string(),
                url: String::new(),
            },
        );
        let port: Arc<TagGateway> = inner.clone();

        assert_eq!(port.resource(), "tag");
        assert!(port.find_by_id("t1").unwrap().is_some());
        assert!(port.find_by_id_async("t2").await.unwrap().is_none());
        assert_eq!(inner.call_count(), 2);
    }
}
