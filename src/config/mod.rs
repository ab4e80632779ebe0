//! # Configuration
//!
//! Layered configuration for the edge service. See [`loader::ConfigManager`]
//! for the layering order. Every section has defaults, so any layer may be
//! partial or missing.

pub mod error;
pub mod loader;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

use crate::constants::priority;
use crate::pipeline::PipelineMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub pipeline: PipelineSection,
    pub circuit_breaker: CircuitBreakerSection,
    pub cache: CacheSection,
    pub logging: LoggingSection,
}

impl EdgeConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        self.circuit_breaker.validate()?;
        self.cache.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    /// Enrichers at or above this priority abort the pipeline on failure
    pub critical_threshold: i32,

    pub default_mode: PipelineMode,

    /// Per content type override of `default_mode`
    pub content_modes: HashMap<String, PipelineMode>,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            critical_threshold: priority::CRITICAL_THRESHOLD,
            default_mode: PipelineMode::Graceful,
            content_modes: HashMap::new(),
        }
    }
}

impl PipelineSection {
    pub fn mode_for(&self, content_type: &str) -> PipelineMode {
        self.content_modes
            .get(content_type)
            .copied()
            .unwrap_or(self.default_mode)
    }
}

/// Circuit breaker settings for one upstream component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitBreakerComponentConfig {
    pub failure_threshold: u32,

    pub recovery_timeout_ms: u64,
}

impl Default for CircuitBreakerComponentConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout_ms: 30_000,
        }
    }
}

impl CircuitBreakerComponentConfig {
    /// Convert to the resilience module's format
    pub fn to_resilience_config(&self) -> crate::resilience::CircuitBreakerConfig {
        crate::resilience::CircuitBreakerConfig {
            failure_threshold: self.failure_threshold,
            recovery_timeout: Duration::from_millis(self.recovery_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerSection {
    pub enabled: bool,

    pub default_config: CircuitBreakerComponentConfig,

    /// Overrides keyed by upstream component name
    pub component_configs: HashMap<String, CircuitBreakerComponentConfig>,
}

impl Default for CircuitBreakerSection {
    fn default() -> Self {
        Self {
            enabled: true,
            default_config: CircuitBreakerComponentConfig::default(),
            component_configs: HashMap::new(),
        }
    }
}

impl CircuitBreakerSection {
    pub fn config_for_component(&self, component_name: &str) -> &CircuitBreakerComponentConfig {
        self.component_configs
            .get(component_name)
            .unwrap_or(&self.default_config)
    }

    fn validate(&self) -> ConfigResult<()> {
        let all = std::iter::once(("default", &self.default_config)).chain(
            self.component_configs
                .iter()
                .map(|(name, cfg)| (name.as_str(), cfg)),
        );

        for (name, cfg) in all {
            cfg.to_resilience_config().validate().map_err(|reason| {
                ConfigurationError::invalid_value(
                    format!("circuit_breaker.{name}"),
                    format!("{cfg:?}"),
                    reason,
                )
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    pub enabled: bool,

    /// `moka` or `noop`
    pub backend: String,

    pub max_capacity: u64,

    pub default_ttl_seconds: u64,

    /// TTL overrides keyed by upstream component name
    pub ttl_overrides: HashMap<String, u64>,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: "moka".to_string(),
            max_capacity: 10_000,
            default_ttl_seconds: 300,
            ttl_overrides: HashMap::new(),
        }
    }
}

impl CacheSection {
    pub fn ttl_for(&self, component: &str) -> Duration {
        let seconds = self
            .ttl_overrides
            .get(component)
            .copied()
            .unwrap_or(self.default_ttl_seconds);
        Duration::from_secs(seconds)
    }

    fn validate(&self) -> ConfigResult<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.max_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "cache.max_capacity",
                "0",
                "must be greater than 0 when the cache is enabled",
            ));
        }

        if self.default_ttl_seconds == 0 {
            return Err(ConfigurationError::invalid_value(
                "cache.default_ttl_seconds",
                "0",
                "must be greater than 0",
            ));
        }

        if let Some((component, _)) = self.ttl_overrides.iter().find(|(_, ttl)| **ttl == 0) {
            return Err(ConfigurationError::invalid_value(
                format!("cache.ttl_overrides.{component}"),
                "0",
                "must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `pretty` or `json`
    pub format: String,

    /// Level override; when unset the level follows the environment
    pub level: Option<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: "pretty".to_string(),
            level: None,
        }
    }
}

impl LoggingSection {
    fn validate(&self) -> ConfigResult<()> {
        match self.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigurationError::invalid_value(
                "logging.format",
                other,
                "expected 'pretty' or 'json'",
            )),
        }
    }
}
