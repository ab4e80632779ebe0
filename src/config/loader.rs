//! Configuration Loader
//!
//! Layers, lowest precedence first:
//!
//! 1. built-in defaults (`EdgeConfig::default()`)
//! 2. `{config_dir}/base.toml` (optional)
//! 3. `{config_dir}/{environment}.toml` (optional)
//! 4. environment variables `EDGE__SECTION__FIELD`, e.g. `EDGE__CACHE__ENABLED=false`
//!
//! The merged result is validated before it is handed out.

use super::error::{ConfigResult, ConfigurationError};
use super::EdgeConfig;
use crate::constants::env as env_keys;
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: EdgeConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(None, &environment)
    }

    /// Load from `config_dir` (or the default directory) for an explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_env_source(config_dir, environment, None)
    }

    /// Same as [`Self::load_from_directory_with_env`] but reads variable
    /// overrides from `env_source` instead of the process environment
    pub fn load_with_env_source(
        config_dir: Option<PathBuf>,
        environment: &str,
        env_source: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            environment = environment,
            config_directory = %config_directory.display(),
            "Loading configuration"
        );

        let config = Self::build(&config_directory, environment, env_source)?;
        config.validate()?;

        info!(
            environment = environment,
            cache_backend = %config.cache.backend,
            cache_enabled = config.cache.enabled,
            circuit_breakers_enabled = config.circuit_breaker.enabled,
            critical_threshold = config.pipeline.critical_threshold,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Wrap an already-built configuration (tests, embedding)
    pub fn from_config(config: EdgeConfig, environment: impl Into<String>) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            environment: environment.into(),
            config_directory: Self::default_config_directory(),
        })
    }

    fn build(
        config_directory: &Path,
        environment: &str,
        env_source: Option<HashMap<String, String>>,
    ) -> ConfigResult<EdgeConfig> {
        let defaults = Config::try_from(&EdgeConfig::default())?;

        let base_file = config_directory.join("base.toml");
        let env_file = config_directory.join(format!("{environment}.toml"));

        let variables = Environment::with_prefix(env_keys::CONFIG_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(env_source);

        let merged = Config::builder()
            .add_source(defaults)
            .add_source(File::from(base_file).format(FileFormat::Toml).required(false))
            .add_source(File::from(env_file).format(FileFormat::Toml).required(false))
            .add_source(variables)
            .build()
            .map_err(|e| ConfigurationError::load_error(environment, e))?;

        Ok(merged.try_deserialize::<EdgeConfig>()?)
    }

    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Sanitized JSON view for debugging endpoints and logs
    pub fn debug_config(&self) -> serde_json::Value {
        serde_json::json!({
            "environment": self.environment,
            "config_directory": self.config_directory.display().to_string(),
            "config": self.config,
        })
    }

    pub fn detect_environment() -> String {
        env::var(env_keys::ENVIRONMENT)
            .or_else(|_| env::var(env_keys::FALLBACK_ENVIRONMENT))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    fn default_config_directory() -> PathBuf {
        env::var(env_keys::CONFIG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineMode;
    use std::fs;
    use tempfile::TempDir;

    fn no_env() -> Option<HashMap<String, String>> {
        Some(HashMap::new())
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let manager =
            ConfigManager::load_with_env_source(Some(dir.path().to_path_buf()), "test", no_env())
                .unwrap();

        assert_eq!(manager.config(), &EdgeConfig::default());
        assert_eq!(manager.environment(), "test");
    }

    #[test]
    fn test_environment_file_overrides_base() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("base.toml"),
            r#"
[cache]
default_ttl_seconds = 120
max_capacity = 500

[circuit_breaker.component_configs.comments]
failure_threshold = 2
recovery_timeout_ms = 5000
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("production.toml"),
            r#"
[cache]
default_ttl_seconds = 600

[pipeline]
default_mode = "strict"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let manager = ConfigManager::load_with_env_source(
            Some(dir.path().to_path_buf()),
            "production",
            no_env(),
        )
        .unwrap();
        let config = manager.config();

        assert_eq!(config.cache.default_ttl_seconds, 600);
        assert_eq!(config.cache.max_capacity, 500);
        assert_eq!(config.pipeline.default_mode, PipelineMode::Strict);
        assert_eq!(config.logging.format, "json");
        assert_eq!(
            config
                .circuit_breaker
                .config_for_component("comments")
                .failure_threshold,
            2
        );
    }

    #[test]
    fn test_environment_variables_win() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("base.toml"), "[cache]\nenabled = true\n").unwrap();

        let mut vars = HashMap::new();
        vars.insert("EDGE__CACHE__ENABLED".to_string(), "false".to_string());
        vars.insert(
            "EDGE__PIPELINE__CRITICAL_THRESHOLD".to_string(),
            "90".to_string(),
        );

        let manager =
            ConfigManager::load_with_env_source(Some(dir.path().to_path_buf()), "test", Some(vars))
                .unwrap();

        assert!(!manager.config().cache.enabled);
        assert_eq!(manager.config().pipeline.critical_threshold, 90);
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("base.toml"),
            "[circuit_breaker.default_config]\nfailure_threshold = 0\nrecovery_timeout_ms = 1000\n",
        )
        .unwrap();

        let result =
            ConfigManager::load_with_env_source(Some(dir.path().to_path_buf()), "test", no_env());
        assert!(matches!(result, Err(ConfigurationError::InvalidValue { .. })));
    }

    #[test]
    fn test_malformed_toml_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("base.toml"), "[cache\nenabled = ").unwrap();

        let result =
            ConfigManager::load_with_env_source(Some(dir.path().to_path_buf()), "test", no_env());
        assert!(matches!(result, Err(ConfigurationError::LoadError { .. })));
    }
}
