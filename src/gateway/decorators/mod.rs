//! # Gateway Decorators
//!
//! Each decorator implements [`Gateway`] by wrapping another one, so they
//! compose freely. [`ResilienceLayer`] applies them in the canonical order:
//!
//! ```text
//! CachedGateway            <- hits never touch the breaker
//!   └── CircuitBreakerGateway
//!         └── transport gateway
//! ```

pub mod cached;
pub mod circuit_breaker;

pub use cached::CachedGateway;
pub use circuit_breaker::CircuitBreakerGateway;

use crate::cache::CacheProvider;
use crate::config::{CacheSection, EdgeConfig};
use crate::gateway::Gateway;
use crate::resilience::CircuitBreakerManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Port trait object with the same key and item as `G`
pub type GatewayHandle<G> =
    Arc<dyn Gateway<Key = <G as Gateway>::Key, Item = <G as Gateway>::Item>>;

/// Wraps transport gateways with the configured cache and breaker
///
/// Built once at startup. Every wrap of the same component shares that
/// component's breaker through the manager.
#[derive(Debug, Clone)]
pub struct ResilienceLayer {
    cache: CacheProvider,
    cache_config: CacheSection,
    breakers: CircuitBreakerManager,
}

impl ResilienceLayer {
    pub fn from_config(config: &EdgeConfig) -> Self {
        Self {
            cache: CacheProvider::from_config(&config.cache),
            cache_config: config.cache.clone(),
            breakers: CircuitBreakerManager::from_config(&config.circuit_breaker),
        }
    }

    pub fn breakers(&self) -> &CircuitBreakerManager {
        &self.breakers
    }

    pub fn cache(&self) -> &CacheProvider {
        &self.cache
    }

    pub fn wrap<G>(&self, component: &str, gateway: G) -> GatewayHandle<G>
    where
        G: Gateway + 'static,
        G::Key: 'static,
        G::Item: Serialize + DeserializeOwned,
    {
        let guarded: GatewayHandle<G> = if self.breakers.is_enabled() {
            let breaker = self.breakers.get_circuit_breaker(component);
            Arc::new(CircuitBreakerGateway::new(gateway, breaker))
        } else {
            Arc::new(gateway)
        };

        if !self.cache.is_enabled() {
            debug!(component, breaker = self.breakers.is_enabled(), "Gateway wrapped");
            return guarded;
        }

        let ttl = self.cache_config.ttl_for(component);
        debug!(
            component,
            breaker = self.breakers.is_enabled(),
            ttl_seconds = ttl.as_secs(),
            "Gateway wrapped"
        );
        Arc::new(CachedGateway::new(guarded, self.cache.clone(), ttl))
    }
}
