//! # Resilience Module
//!
//! Circuit breakers that isolate unhealthy upstreams so the enrichment
//! pipeline degrades instead of stalling.
//!
//! ```rust
//! use editorial_core::resilience::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
//! use std::time::Duration;
//!
//! let breaker = CircuitBreaker::new(
//!     "section",
//!     CircuitBreakerConfig {
//!         failure_threshold: 2,
//!         recovery_timeout: Duration::from_secs(30),
//!     },
//! );
//!
//! if breaker.can_make_request() {
//!     breaker.record_failure();
//!     breaker.record_failure();
//! }
//! assert_eq!(breaker.state(), CircuitState::Open);
//! ```

pub mod circuit_breaker;
pub mod config;
pub mod manager;
pub mod metrics;

pub use circuit_breaker::{CallPermit, CircuitBreaker, CircuitState};
pub use config::CircuitBreakerConfig;
pub use manager::CircuitBreakerManager;
pub use metrics::{CircuitBreakerMetrics, SystemCircuitBreakerMetrics};
