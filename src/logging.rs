//! # Structured Logging Module
//!
//! Environment-aware `tracing` setup. The subscriber is installed once per
//! process; later calls and hosts that already installed one are left alone.

use crate::config::LoggingSection;
use crate::constants::env;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with the default (pretty) format
pub fn init_structured_logging() {
    init_with_config(&LoggingSection::default());
}

/// Initialize structured logging honouring the `logging` config section
///
/// `RUST_LOG` wins over everything; then the configured level; then the
/// level implied by the detected environment.
pub fn init_with_config(config: &LoggingSection) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = config
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment).to_string());

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
        let json = config.format.eq_ignore_ascii_case("json");

        let layer = if json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
            return;
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            format = if json { "json" } else { "pretty" },
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Current environment from `EDGE_ENV`, then `APP_ENV`
pub fn get_environment() -> String {
    std::env::var(env::ENVIRONMENT)
        .or_else(|_| std::env::var(env::FALLBACK_ENVIRONMENT))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for gateway calls
pub fn log_gateway_operation(
    component: &str,
    operation: &str,
    key: &str,
    status: &str,
    duration_ms: Option<u64>,
) {
    tracing::info!(
        component = %component,
        operation = %operation,
        key = %key,
        status = %status,
        duration_ms = duration_ms,
        timestamp = %Utc::now().to_rfc3339(),
        "🌐 GATEWAY_OPERATION"
    );
}

/// Log structured data for pipeline runs
pub fn log_pipeline_operation(
    operation: &str,
    editorial_id: &str,
    enricher: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        editorial_id = %editorial_id,
        enricher = enricher,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🧩 PIPELINE_OPERATION"
    );
}

/// Log structured data for registry operations
pub fn log_registry_operation(registry: &str, operation: &str, key: &str, status: &str) {
    tracing::info!(
        registry = %registry,
        operation = %operation,
        key = %key,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "📚 REGISTRY_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}
