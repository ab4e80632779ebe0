//! In-memory cache provider using Moka
//!
//! In-process only: each process keeps its own entries. Every entry carries
//! its own TTL so upstreams with different freshness needs can share a store.

use crate::cache::errors::CacheResult;
use crate::cache::traits::CacheService;
use moka::sync::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

#[derive(Clone)]
pub struct MokaCacheService {
    cache: Cache<String, CacheEntry>,
}

impl std::fmt::Debug for MokaCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheService")
            .field("max_capacity", &self.cache.policy().max_capacity())
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

impl MokaCacheService {
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        debug!(max_capacity, "Moka in-memory cache service created");

        Self { cache }
    }

    /// Flush pending evictions (used by tests to observe capacity bounds)
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl CacheService for MokaCacheService {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let result = self.cache.get(key).map(|entry| entry.payload);

        if result.is_some() {
            debug!(key = key, "Cache HIT (moka)");
        } else {
            debug!(key = key, "Cache MISS (moka)");
        }

        Ok(result)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.cache.insert(
            key.to_string(),
            CacheEntry {
                payload: value.to_string(),
                ttl,
            },
        );

        debug!(key = key, ttl_ms = ttl.as_millis() as u64, "Cache SET (moka)");
        Ok(())
    }

    fn delete(&self, key: &str) -> CacheResult<()> {
        self.cache.invalidate(key);
        debug!(key = key, "Cache DEL (moka)");
        Ok(())
    }

    fn delete_prefix(&self, prefix: &str) -> CacheResult<u64> {
        let keys: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.as_ref().clone())
            .collect();

        for key in &keys {
            self.cache.invalidate(key);
        }

        debug!(prefix = prefix, removed = keys.len(), "Cache prefix DEL (moka)");
        Ok(keys.len() as u64)
    }

    fn health_check(&self) -> CacheResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "moka"
    }
}
