//! # Circuit Breaker Implementation
//!
//! Classic three-state breaker: Closed (pass-through), Open (failing fast) and
//! HalfOpen (one trial call). The Open to HalfOpen transition is evaluated
//! lazily inside `can_make_request`; there is no background timer.

use crate::resilience::{CircuitBreakerConfig, CircuitBreakerMetrics};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Lock-free counters shared by every caller of one breaker
#[derive(Debug)]
struct AtomicCircuitBreakerMetrics {
    total_calls: AtomicU64,
    success_count: AtomicU64,
    failure_count: AtomicU64,
    rejected_count: AtomicU64,
    consecutive_failures: AtomicU64,
}

impl AtomicCircuitBreakerMetrics {
    fn new() -> Self {
        Self {
            total_calls: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            rejected_count: AtomicU64::new(0),
            consecutive_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    fn record_success(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.success_count.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    #[inline]
    fn record_failure(&self) -> u64 {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[inline]
    fn record_rejected(&self) {
        self.rejected_count.fetch_add(1, Ordering::Relaxed);
    }

    fn clear(&self) {
        self.total_calls.store(0, Ordering::Relaxed);
        self.success_count.store(0, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
        self.rejected_count.store(0, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    fn snapshot(&self, state: CircuitState) -> CircuitBreakerMetrics {
        let total_calls = self.total_calls.load(Ordering::Relaxed);
        let failure_count = self.failure_count.load(Ordering::Relaxed);
        let failure_rate = if total_calls > 0 {
            failure_count as f64 / total_calls as f64
        } else {
            0.0
        };

        CircuitBreakerMetrics {
            total_calls,
            success_count: self.success_count.load(Ordering::Relaxed),
            failure_count,
            rejected_count: self.rejected_count.load(Ordering::Relaxed),
            consecutive_failures: self.consecutive_failures.load(Ordering::Relaxed),
            current_state: state,
            failure_rate,
        }
    }
}

/// Circuit breaker states representing the current operational mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircuitState {
    /// Normal operation - all calls are allowed through
    Closed = 0,
    /// Failure mode - all calls fail fast without executing
    Open = 1,
    /// Testing recovery - a single trial call is in flight
    HalfOpen = 2,
}

impl From<u8> for CircuitState {
    fn from(value: u8) -> Self {
        match value {
            0 => CircuitState::Closed,
            1 => CircuitState::Open,
            2 => CircuitState::HalfOpen,
            _ => CircuitState::Open, // Default to safest state
        }
    }
}

/// Core circuit breaker with atomic state management
///
/// One instance per upstream dependency, shared by reference between every
/// request that touches that upstream.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,

    state: AtomicU8,

    config: CircuitBreakerConfig,

    metrics: AtomicCircuitBreakerMetrics,

    /// Monotonic reference point for `last_failure_nanos`
    origin: Instant,

    /// Nanos since `origin` of the most recent failure.
    /// Written before the state store (Release) and read after the state load
    /// (Acquire).
    last_failure_nanos: AtomicU64,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        let name = name.into();
        info!(
            component = %name,
            failure_threshold = config.failure_threshold,
            recovery_timeout_ms = config.recovery_timeout.as_millis() as u64,
            "Circuit breaker initialized"
        );

        Self {
            name,
            state: AtomicU8::new(CircuitState::Closed as u8),
            config,
            metrics: AtomicCircuitBreakerMetrics::new(),
            origin: Instant::now(),
            last_failure_nanos: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> CircuitState {
        CircuitState::from(self.state.load(Ordering::Acquire))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    pub fn failure_count(&self) -> u64 {
        self.metrics.consecutive_failures.load(Ordering::Relaxed)
    }

    #[inline]
    fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    fn since_last_failure(&self) -> Duration {
        let last = self.last_failure_nanos.load(Ordering::Acquire);
        Duration::from_nanos(self.now_nanos().saturating_sub(last))
    }

    /// Gate evaluated before every call
    ///
    /// Returns `false` while Open and inside the recovery window, and while a
    /// HalfOpen trial is in flight. Exactly one caller wins the Open to
    /// HalfOpen compare-and-swap once the window has elapsed.
    pub fn can_make_request(&self) -> bool {
        let allowed = match self.state() {
            CircuitState::Closed => true,
            CircuitState::Open => {
                if self.since_last_failure() >= self.config.recovery_timeout {
                    self.try_transition_to_half_open()
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => false,
        };

        if !allowed {
            self.metrics.record_rejected();
            debug!(component = %self.name, state = ?self.state(), "Call rejected by circuit breaker");
        }
        allowed
    }

    /// Admit one call, returning the permit that must report its outcome
    ///
    /// A permit dropped without an outcome (the caller gave up on the call,
    /// usually by cancelling its future) is recorded as a failure, so an
    /// abandoned half-open trial reopens the breaker instead of holding the
    /// trial slot forever.
    pub fn try_acquire(&self) -> Option<CallPermit<'_>> {
        self.can_make_request().then(|| CallPermit {
            breaker: self,
            resolved: false,
        })
    }

    /// Record a call that reached the upstream and succeeded
    pub fn record_success(&self) {
        self.metrics.record_success();

        match self.state() {
            CircuitState::Closed => {}
            CircuitState::HalfOpen => self.transition_to_closed(),
            CircuitState::Open => {
                // A call admitted before the breaker opened finished late
                warn!(component = %self.name, "Success recorded while circuit is open");
            }
        }
    }

    /// Record a call that reached the upstream and failed
    pub fn record_failure(&self) {
        self.last_failure_nanos
            .store(self.now_nanos(), Ordering::Release);
        let failures = self.metrics.record_failure();

        debug!(
            component = %self.name,
            consecutive_failures = failures,
            "Upstream call failed"
        );

        match self.state() {
            CircuitState::Closed => {
                if failures >= u64::from(self.config.failure_threshold) {
                    self.transition_to_open(CircuitState::Closed);
                }
            }
            CircuitState::HalfOpen => {
                // Trial failed; recovery clock restarts from this failure
                self.transition_to_open(CircuitState::HalfOpen);
            }
            CircuitState::Open => {}
        }
    }

    fn try_transition_to_half_open(&self) -> bool {
        let won = self
            .state
            .compare_exchange(
                CircuitState::Open as u8,
                CircuitState::HalfOpen as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();

        if won {
            info!(component = %self.name, "Circuit breaker half-open (trial call allowed)");
        }
        won
    }

    fn transition_to_open(&self, from: CircuitState) {
        if self
            .state
            .compare_exchange(
                from as u8,
                CircuitState::Open as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
        {
            error!(
                component = %self.name,
                consecutive_failures = self.failure_count(),
                failure_threshold = self.config.failure_threshold,
                recovery_timeout_ms = self.config.recovery_timeout.as_millis() as u64,
                "Circuit breaker opened (failing fast)"
            );
        }
    }

    fn transition_to_closed(&self) {
        self.metrics.consecutive_failures.store(0, Ordering::Relaxed);
        self.state
            .store(CircuitState::Closed as u8, Ordering::Release);

        info!(component = %self.name, "Circuit breaker closed (recovered)");
    }

    /// Force CLOSED with all counters cleared
    pub fn reset(&self) {
        self.metrics.clear();
        self.last_failure_nanos.store(0, Ordering::Release);
        self.state
            .store(CircuitState::Closed as u8, Ordering::Release);
        warn!(component = %self.name, "Circuit breaker reset");
    }

    /// Force OPEN; the recovery window starts now
    pub fn force_open(&self) {
        self.last_failure_nanos
            .store(self.now_nanos(), Ordering::Release);
        self.state.store(CircuitState::Open as u8, Ordering::Release);
        warn!(component = %self.name, "Circuit breaker forced open");
    }

    pub fn metrics(&self) -> CircuitBreakerMetrics {
        self.metrics.snapshot(self.state())
    }

    pub fn is_healthy(&self) -> bool {
        self.metrics().is_healthy()
    }
}

/// Admission for one call through a [`CircuitBreaker`]
#[must_use = "a permit dropped without an outcome counts as a failure"]
#[derive(Debug)]
pub struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    resolved: bool,
}

impl CallPermit<'_> {
    pub fn succeed(mut self) {
        self.resolved = true;
        self.breaker.record_success();
    }

    pub fn fail(mut self) {
        self.resolved = true;
        self.breaker.record_failure();
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            warn!(
                component = %self.breaker.name,
                state = ?self.breaker.state(),
                "Admitted call abandoned before completion"
            );
            self.breaker.record_failure();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn breaker(threshold: u32, recovery_ms: u64) -> CircuitBreaker {
        CircuitBreaker::new(
            "test",
            CircuitBreakerConfig {
                failure_threshold: threshold,
                recovery_timeout: Duration::from_millis(recovery_ms),
            },
        )
    }

    #[test]
    fn test_opens_after_threshold_consecutive_failures() {
        let circuit = breaker(2, 1_000);
        assert_eq!(circuit.state(), CircuitState::Closed);

        circuit.record_failure();
        assert_eq!(circuit.state(), CircuitState::Closed);

        circuit.record_failure();
        assert_eq!(circuit.state(), CircuitState::Open);
        assert!(!circuit.can_make_request());
        assert_eq!(circuit.metrics().rejected_count, 1);
    }

    #[test]
    fn test_success_resets_consecutive_count() {
        let circuit = breaker(2, 1_000);
        circuit.record_failure();
        circuit.record_success();
        circuit.record_failure();

        assert_eq!(circuit.state(), CircuitState::Closed);
        assert_eq!(circuit.failure_count(), 1);
    }

    #[tokio::test]
    async fn test_half_open_admits_exactly_one_trial() {
        let circuit = breaker(1, 20);
        circuit.record_failure();
        assert_eq!(circuit.state(), CircuitState::Open);

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(circuit.can_make_request());
        assert_eq!(circuit.state(), CircuitState::HalfOpen);
        assert!(!circuit.can_make_request());

        circuit.record_success();
        assert_eq!(circuit.state(), CircuitState::Closed);
        assert_eq!(circuit.failure_count(), 0);
    }

    #[tokio::test]
    async fn test_half_open_failure_reopens_and_restarts_clock() {
        let circuit = breaker(1, 40);
        circuit.record_failure();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(circuit.can_make_request());
        circuit.record_failure();
        assert_eq!(circuit.state(), CircuitState::Open);

        // The window restarted at the trial failure
        assert!(!circuit.can_make_request());
    }

    #[tokio::test]
    async fn test_concurrent_callers_race_for_single_trial() {
        let circuit = Arc::new(breaker(1, 10));
        circuit.record_failure();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let circuit = Arc::clone(&circuit);
                std::thread::spawn(move || circuit.can_make_request())
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|allowed| *allowed)
            .count();
        assert_eq!(admitted, 1);
    }

    #[tokio::test]
    async fn test_abandoned_trial_permit_reopens() {
        let circuit = breaker(1, 10);
        circuit.record_failure();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let permit = circuit.try_acquire();
        assert!(permit.is_some());
        assert_eq!(circuit.state(), CircuitState::HalfOpen);
        drop(permit);

        assert_eq!(circuit.state(), CircuitState::Open);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let retry = circuit.try_acquire();
        assert!(retry.is_some());
        if let Some(permit) = retry {
            permit.succeed();
        }
        assert_eq!(circuit.state(), CircuitState::Closed);
    }

    #[test]
    fn test_resolved_permits_record_once() {
        let circuit = breaker(3, 1_000);
        if let Some(permit) = circuit.try_acquire() {
            permit.fail();
        }
        if let Some(permit) = circuit.try_acquire() {
            permit.succeed();
        }

        let metrics = circuit.metrics();
        assert_eq!(metrics.total_calls, 2);
        assert_eq!(metrics.failure_count, 1);
        assert_eq!(metrics.success_count, 1);
    }

    #[test]
    fn test_reset_and_force_open() {
        let circuit = breaker(1, 60_000);
        circuit.force_open();
        assert_eq!(circuit.state(), CircuitState::Open);
        assert!(!circuit.can_make_request());

        circuit.reset();
        assert_eq!(circuit.state(), CircuitState::Closed);
        assert_eq!(circuit.metrics(), CircuitBreakerMetrics::new());
        assert!(circuit.can_make_request());
    }
}
