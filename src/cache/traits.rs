//! Cache service trait definition

use super::errors::CacheResult;
use std::time::Duration;

/// Trait defining cache store operations
///
/// Operations are synchronous so that the blocking and async gateway paths
/// share one store and one code path. Backends must be internally
/// synchronized; the gateway decorators never lock around them.
pub trait CacheService: Send + Sync {
    /// Returns `Ok(Some(value))` on cache hit, `Ok(None)` on cache miss.
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Set a value with a per-entry TTL
    fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    fn delete(&self, key: &str) -> CacheResult<()>;

    /// Delete every key starting with `prefix`, returning how many were removed
    fn delete_prefix(&self, prefix: &str) -> CacheResult<u64>;

    fn health_check(&self) -> CacheResult<bool>;

    fn provider_name(&self) -> &'static str;
}
