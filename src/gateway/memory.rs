//! Fixture-backed gateway
//!
//! Serves records from memory, counts calls and can be switched into a
//! failing mode. Used for local runs without upstreams and throughout the
//! test suites.

use super::{Gateway, GatewayError, GatewayKey, GatewayResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct InMemoryGateway<K: ?Sized, V> {
    resource: String,
    records: RwLock<HashMap<String, V>>,
    failure: RwLock<Option<GatewayError>>,
    calls: AtomicUsize,
    _key: PhantomData<fn(&K)>,
}

impl<K: ?Sized, V> fmt::Debug for InMemoryGateway<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryGateway")
            .field("resource", &self.resource)
            .field("records", &self.records.read().len())
            .field("calls", &self.calls.load(Ordering::Relaxed))
            .finish()
    }
}

impl<K, V> InMemoryGateway<K, V>
where
    K: GatewayKey + ?Sized,
    V: Clone,
{
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            records: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
            calls: AtomicUsize::new(0),
            _key: PhantomData,
        }
    }

    #[must_use]
    pub fn with_record(self, id: &K, value: V) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&self, id: &K, value: V) {
        self.records.write().insert(id.cache_key(), value);
    }

    pub fn remove(&self, id: &K) {
        self.records.write().remove(&id.cache_key());
    }

    /// Every subsequent call fails with `error` until [`Self::recover`]
    pub fn fail_with(&self, error: GatewayError) {
        *self.failure.write() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.write() = None;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, id: &K) -> GatewayResult<Option<V>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure.read().clone() {
            return Err(error);
        }
        Ok(self.records.read().get(&id.cache_key()).cloned())
    }
}

#[async_trait]
impl<K, V> Gateway for InMemoryGateway<K, V>
where
    K: GatewayKey + Send + Sync + ?Sized,
    V: Clone + Send + Sync + 'static,
{
    type Key = K;
    type Item = V;

    fn resource(&self) -> &str {
        &self.resource
    }

    fn find_by_id(&self, id: &K) -> GatewayResult<Option<V>> {
        self.lookup(id)
    }

    async fn find_by_id_async(&self, id: &K) -> GatewayResult<Option<V>> {
        self.lookup(id)
    }
}
