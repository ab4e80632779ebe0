//! Circuit-breaking decorator

use crate::gateway::{Gateway, GatewayError, GatewayKey, GatewayResult};
use crate::logging::log_gateway_operation;
use crate::resilience::{CallPermit, CircuitBreaker, CircuitState};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Fails fast with [`GatewayError::CircuitOpen`] while the upstream is unhealthy
///
/// Only errors for which [`GatewayError::trips_breaker`] holds count as
/// failures. `Ok(None)` and `NotFound` are successful round trips.
pub struct CircuitBreakerGateway<G> {
    inner: G,
    breaker: Arc<CircuitBreaker>,
}

impl<G: Gateway> fmt::Debug for CircuitBreakerGateway<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreakerGateway")
            .field("resource", &self.inner.resource())
            .field("state", &self.breaker.state())
            .finish()
    }
}

impl<G: Gateway> CircuitBreakerGateway<G> {
    /// Share `breaker` with every other decorator of the same upstream
    pub fn new(inner: G, breaker: Arc<CircuitBreaker>) -> Self {
        Self { inner, breaker }
    }

    pub fn state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Consecutive failures recorded so far
    pub fn failure_count(&self) -> u64 {
        self.breaker.failure_count()
    }

    pub fn reset(&self) {
        self.breaker.reset();
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// The permit is resolved by `observe`; a cancelled call drops
    /// it unresolved and counts as a failure
    fn admit(&self) -> GatewayResult<CallPermit<'_>> {
        if let Some(permit) = self.breaker.try_acquire() {
            return Ok(permit);
        }
        warn!(
            component = %self.breaker.name(),
            resource = %self.inner.resource(),
            "Circuit open, failing fast"
        );
        Err(GatewayError::CircuitOpen {
            service: self.inner.resource().to_string(),
        })
    }

    fn observe<T>(
        &self,
        permit: CallPermit<'_>,
        id: &G::Key,
        started: Instant,
        result: GatewayResult<T>,
    ) -> GatewayResult<T> {
        match &result {
            Err(e) if e.trips_breaker() => {
                permit.fail();
                log_gateway_operation(
                    self.breaker.name(),
                    "find_by_id",
                    &id.cache_key(),
                    &format!("failure: {e}"),
                    Some(started.elapsed().as_millis() as u64),
                );
            }
            _ => permit.succeed(),
        }
        result
    }
}

#[async_trait]
impl<G: Gateway> Gateway for CircuitBreakerGateway<G> {
    type Key = G::Key;
    type Item = G::Item;

    fn resource(&self) -> &str {
        self.inner.resource()
    }

    fn find_by_id(&self, id: &Self::Key) -> GatewayResult<Option<Self::Item>> {
        let permit = self.admit()?;
        let started = Instant::now();
        let result = self.inner.find_by_id(id);
        self.observe(permit, id, started, result)
    }

    async fn find_by_id_async(&self, id: &Self::Key) -> GatewayResult<Option<Self::Item>> {
        let permit = self.admit()?;
        let started = Instant::now();
        let result = self.inner.find_by_id_async(id).await;
        self.observe(permit, id, started, result)
    }
}
