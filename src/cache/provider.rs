//! Cache provider with enum dispatch over the configured backend

use super::errors::CacheResult;
use super::providers::{MokaCacheService, NoOpCacheService};
use super::traits::CacheService;
use crate::config::CacheSection;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
enum CacheBackend {
    Moka(Box<MokaCacheService>),
    NoOp(NoOpCacheService),
}

impl CacheBackend {
    fn service(&self) -> &dyn CacheService {
        match self {
            Self::Moka(s) => s.as_ref(),
            Self::NoOp(s) => s,
        }
    }
}

/// Shared cache store handed to every `CachedGateway`
///
/// Cloning is cheap; clones share the same underlying entries.
#[derive(Debug, Clone)]
pub struct CacheProvider {
    backend: CacheBackend,
}

impl CacheProvider {
    /// Build the provider from configuration
    ///
    /// Never fails: a disabled section or an unknown backend yields the no-op
    /// provider so startup is not blocked on cache issues.
    pub fn from_config(config: &CacheSection) -> Self {
        if !config.enabled {
            info!("Gateway cache disabled by configuration");
            return Self::noop();
        }

        match config.backend.as_str() {
            "moka" | "memory" | "in-memory" => {
                info!(
                    backend = "moka",
                    max_capacity = config.max_capacity,
                    default_ttl_seconds = config.default_ttl_seconds,
                    "In-memory cache provider initialized"
                );
                Self::in_memory(config.max_capacity)
            }
            "noop" | "none" => Self::noop(),
            other => {
                warn!(backend = other, "Unknown cache backend, falling back to NoOp");
                Self::noop()
            }
        }
    }

    pub fn in_memory(max_capacity: u64) -> Self {
        Self {
            backend: CacheBackend::Moka(Box::new(MokaCacheService::new(max_capacity))),
        }
    }

    pub fn noop() -> Self {
        Self {
            backend: CacheBackend::NoOp(NoOpCacheService::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.backend, CacheBackend::NoOp(_))
    }

    pub fn provider_name(&self) -> &'static str {
        self.backend.service().provider_name()
    }

    pub fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.backend.service().get(key)
    }

    pub fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.backend.service().set(key, value, ttl)
    }

    pub fn delete(&self, key: &str) -> CacheResult<()> {
        self.backend.service().delete(key)
    }

    pub fn delete_prefix(&self, prefix: &str) -> CacheResult<u64> {
        self.backend.service().delete_prefix(prefix)
    }

    pub fn health_check(&self) -> CacheResult<bool> {
        self.backend.service().health_check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(enabled: bool, backend: &str) -> CacheSection {
        CacheSection {
            enabled,
            backend: backend.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_config_yields_noop() {
        let provider = CacheProvider::from_config(&section(false, "moka"));
        assert!(!provider.is_enabled());
        assert_eq!(provider.provider_name(), "noop");
    }

    #[test]
    fn test_unknown_backend_falls_back_to_noop() {
        let provider = CacheProvider::from_config(&section(true, "redis"));
        assert!(!provider.is_enabled());
    }

    #[test]
    fn test_clones_share_entries() {
        let provider = CacheProvider::from_config(&section(true, "moka"));
        let clone = provider.clone();

        provider.set("k", "v", Duration::from_secs(60)).unwrap();
        assert_eq!(clone.get("k").unwrap(), Some("v".to_string()));
        assert!(clone.health_check().unwrap());
    }
}
