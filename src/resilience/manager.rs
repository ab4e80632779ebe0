//! # Circuit Breaker Manager
//!
//! Owns one long-lived breaker per upstream component and hands out shared
//! references to it.

use crate::config::CircuitBreakerSection;
use crate::resilience::{
    CircuitBreaker, CircuitBreakerMetrics, CircuitState, SystemCircuitBreakerMetrics,
};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Manager for circuit breakers across upstream components
#[derive(Debug, Clone)]
pub struct CircuitBreakerManager {
    circuit_breakers: Arc<DashMap<String, Arc<CircuitBreaker>>>,

    config: CircuitBreakerSection,
}

impl CircuitBreakerManager {
    pub fn from_config(config: &CircuitBreakerSection) -> Self {
        info!(
            enabled = config.enabled,
            overrides = config.component_configs.len(),
            "Initializing circuit breaker manager"
        );

        Self {
            circuit_breakers: Arc::new(DashMap::new()),
            config: config.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get or create the breaker for a component
    ///
    /// Repeated calls with the same name return the same instance.
    pub fn get_circuit_breaker(&self, component_name: &str) -> Arc<CircuitBreaker> {
        if let Some(breaker) = self.circuit_breakers.get(component_name) {
            return Arc::clone(breaker.value());
        }

        // `entry` holds the shard lock, so concurrent creators converge on one instance
        let breaker = self
            .circuit_breakers
            .entry(component_name.to_string())
            .or_insert_with(|| {
                let component_config = self
                    .config
                    .config_for_component(component_name)
                    .to_resilience_config();
                Arc::new(CircuitBreaker::new(component_name, component_config))
            })
            .value()
            .clone();

        info!(
            component = component_name,
            total_circuit_breakers = self.circuit_breakers.len(),
            "Circuit breaker registered"
        );

        breaker
    }

    pub fn list_components(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .circuit_breakers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    pub fn get_component_metrics(&self, component_name: &str) -> Option<CircuitBreakerMetrics> {
        self.circuit_breakers
            .get(component_name)
            .map(|breaker| breaker.metrics())
    }

    pub fn get_system_metrics(&self) -> SystemCircuitBreakerMetrics {
        let mut system_metrics = SystemCircuitBreakerMetrics::new();
        for entry in self.circuit_breakers.iter() {
            system_metrics.add_circuit_breaker(entry.key().clone(), entry.value().metrics());
        }
        system_metrics
    }

    pub fn get_state_summary(&self) -> HashMap<CircuitState, usize> {
        self.get_system_metrics().count_by_state()
    }

    pub fn system_health_score(&self) -> f64 {
        self.get_system_metrics().health_score()
    }

    /// Reset every breaker to CLOSED
    pub fn reset_all(&self) {
        warn!("Resetting all circuit breakers");
        for entry in self.circuit_breakers.iter() {
            entry.value().reset();
        }
    }
}
