//! No-op cache provider
//!
//! Always misses, always succeeds. Used when caching is disabled or the
//! configured backend is unknown.

use crate::cache::errors::CacheResult;
use crate::cache::traits::CacheService;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct NoOpCacheService;

impl NoOpCacheService {
    pub fn new() -> Self {
        Self
    }
}

impl CacheService for NoOpCacheService {
    fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    fn delete_prefix(&self, _prefix: &str) -> CacheResult<u64> {
        Ok(0)
    }

    fn health_check(&self) -> CacheResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_never_stores() {
        let svc = NoOpCacheService::new();
        svc.set("key", "value", Duration::from_secs(60)).unwrap();
        assert_eq!(svc.get("key").unwrap(), None);
        assert_eq!(svc.delete_prefix("k").unwrap(), 0);
        assert!(svc.health_check().unwrap());
        assert_eq!(svc.provider_name(), "noop");
    }
}
