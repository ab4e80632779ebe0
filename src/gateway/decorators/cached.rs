//! Cache-aside decorator

use crate::cache::{CacheProvider, CacheResult};
use crate::gateway::{Gateway, GatewayKey, GatewayResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Wraps a gateway with a read-through cache
///
/// Hits bypass the inner gateway entirely. Only present values are stored;
/// `Ok(None)` and errors always fall through to the inner gateway on the next
/// call. Cache failures are logged and treated as misses.
pub struct CachedGateway<G: Gateway> {
    inner: G,
    cache: CacheProvider,
    ttl: Duration,
}

impl<G: Gateway> fmt::Debug for CachedGateway<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedGateway")
            .field("resource", &self.inner.resource())
            .field("cache", &self.cache.provider_name())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<G> CachedGateway<G>
where
    G: Gateway,
    G::Item: Serialize + DeserializeOwned,
{
    pub fn new(inner: G, cache: CacheProvider, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Key shared by the blocking and async paths
    pub fn cache_key(&self, id: &G::Key) -> String {
        format!("{}:{}", self.inner.resource(), id.cache_key())
    }

    /// Drop the entry for `id`
    pub fn invalidate(&self, id: &G::Key) {
        let key = self.cache_key(id);
        match self.cache.delete(&key) {
            Ok(()) => debug!(key = %key, "Cache entry invalidated"),
            Err(e) => warn!(key = %key, error = %e, "Cache invalidation failed"),
        }
    }

    /// Drop every entry this gateway wrote
    pub fn invalidate_all(&self) -> u64 {
        let prefix = format!("{}:", self.inner.resource());
        match self.cache.delete_prefix(&prefix) {
            Ok(removed) => removed,
            Err(e) => {
                warn!(prefix = %prefix, error = %e, "Cache prefix invalidation failed");
                0
            }
        }
    }

    fn read_cached(&self, key: &str) -> Option<G::Item> {
        let raw = match self.cache.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match decode(&raw) {
            Ok(item) => {
                debug!(key = %key, "Gateway cache hit");
                Some(item)
            }
            Err(e) => {
                // Stale shape from an older build; drop it and refetch
                warn!(key = %key, error = %e, "Undecodable cache entry discarded");
                let _ = self.cache.delete(key);
                None
            }
        }
    }

    fn store(&self, key: &str, item: &G::Item) {
        let encoded = match encode(item) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %key, error = %e, "Gateway item not serializable, skipping cache write");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &encoded, self.ttl) {
            warn!(key = %key, error = %e, "Cache write failed");
        }
    }

    fn remember(&self, key: &str, result: GatewayResult<Option<G::Item>>) -> GatewayResult<Option<G::Item>> {
        if let Ok(Some(item)) = &result {
            self.store(key, item);
        }
        result
    }
}

fn encode<T: Serialize>(item: &T) -> CacheResult<String> {
    Ok(serde_json::to_string(item)?)
}

fn decode<T: DeserializeOwned>(raw: &str) -> CacheResult<T> {
    Ok(serde_json::from_str(raw)?)
}

#[async_trait]
impl<G> Gateway for CachedGateway<G>
where
    G: Gateway,
    G::Item: Serialize + DeserializeOwned,
{
    type Key = G::Key;
    type Item = G::Item;

    fn resource(&self) -> &str {
        self.inner.resource()
    }

    fn find_by_id(&self, id: &Self::Key) -> GatewayResult<Option<Self::Item>> {
        let key = self.cache_key(id);
        if let Some(hit) = self.read_cached(&key) {
            return Ok(Some(hit));
        }
        debug!(key = %key, "Gateway cache miss");
        let result = self.inner.find_by_id(id);
        self.remember(&key, result)
    }

    async fn find_by_id_async(&self, id: &Self::Key) -> GatewayResult<Option<Self::Item>> {
        let key = self.cache_key(id);
        if let Some(hit) = self.read_cached(&key) {
            return Ok(Some(hit));
        }
        debug!(key = %key, "Gateway cache miss");
        let result = self.inner.find_by_id_async(id).await;
        self.remember(&key, result)
    }
}
