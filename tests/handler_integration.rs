//! Request handling through the bootstrapped engine

mod common;

use common::*;
use editorial_core::bootstrap::EngineBootstrap;
use editorial_core::config::{ConfigManager, EdgeConfig};
use editorial_core::error::ErrorCode;
use editorial_core::gateway::GatewayError;
use editorial_core::pipeline::PipelineMode;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_blank_id_is_a_validation_failure() {
    let fixtures = Fixtures::complete();
    let engine = EngineBootstrap::bootstrap(&EdgeConfig::default(), fixtures.upstreams()).unwrap();

    let err = engine.handler().handle("   ").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(fixtures.editorial.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_content_type_is_a_configuration_error() {
    let fixtures = Fixtures::complete();
    let engine = EngineBootstrap::bootstrap(&EdgeConfig::default(), fixtures.upstreams()).unwrap();

    let err = engine.handler().handle_as("4433", "podcast").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ConfigurationError);
    assert!(err.message().contains("podcast"));
}

#[tokio::test]
async fn test_content_type_selects_pipeline_mode() {
    let fixtures = Fixtures::complete();
    fixtures
        .journalists
        .fail_with(GatewayError::transport("journalists", "connection refused"));

    let mut config = EdgeConfig::default();
    config
        .pipeline
        .content_modes
        .insert("opinion".to_string(), PipelineMode::Strict);
    let engine = EngineBootstrap::bootstrap(&config, fixtures.upstreams()).unwrap();

    let news = engine.handler().handle_as("4433", "news").await.unwrap();
    assert_eq!(news.degradations()[0].enricher, "journalists");

    let opinion = engine.handler().handle_as("4433", "opinion").await.unwrap_err();
    assert_eq!(opinion.context()["enricher"], "journalists");
}

#[tokio::test]
async fn test_concurrent_requests_share_one_engine() {
    let fixtures = Fixtures::complete();
    let engine = Arc::new(EngineBootstrap::bootstrap(&EdgeConfig::default(), fixtures.upstreams()).unwrap());

    let requests: Vec<_> = (0..16)
        .map(|_| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.handler().handle("4433").await })
        })
        .collect();

    for request in requests {
        let ctx = request.await.unwrap().unwrap();
        assert_eq!(ctx.comments_count(), 17);
    }

    // Every later request was served from cache
    assert!(fixtures.editorial.call_count() < 16);
    assert_eq!(engine.status().enrichers.len(), 7);
}

#[tokio::test]
async fn test_engine_from_layered_configuration() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("base.toml"),
        r#"
[pipeline]
default_mode = "strict"

[cache]
enabled = false
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("test.toml"),
        r#"
[circuit_breaker.component_configs.comments]
failure_threshold = 1
recovery_timeout_ms = 1000
"#,
    )
    .unwrap();

    let manager =
        ConfigManager::load_with_env_source(Some(dir.path().to_path_buf()), "test", Some(HashMap::new()))
            .unwrap();
    let fixtures = Fixtures::complete();
    fixtures
        .tags
        .fail_with(GatewayError::transport("tags", "connection refused"));
    let engine = EngineBootstrap::bootstrap(manager.config(), fixtures.upstreams()).unwrap();

    assert_eq!(engine.status().cache_provider, "noop");

    let err = engine.handler().handle("4433").await.unwrap_err();
    assert_eq!(err.context()["enricher"], "tags");

    let comments = engine.breakers().get_circuit_breaker("comments");
    assert_eq!(comments.config().failure_threshold, 1);
}
