//! # Engine Bootstrap
//!
//! Assembles the whole engine from configuration plus one transport gateway
//! per upstream:
//!
//! ```text
//! Upstreams ──ResilienceLayer──> guarded ports
//!                                    │
//!        enrichers + multimedia chain + widget transformers
//!                                    │
//!                           EnrichmentPipeline
//!                                    │
//!                  editorial orchestrator chain (per content type)
//!                                    │
//!                           GetEditorialHandler
//! ```

use crate::config::{ConfigManager, EdgeConfig};
use crate::constants::{components, content_types};
use crate::error::Result;
use crate::gateway::decorators::ResilienceLayer;
use crate::gateway::{
    CommentsGateway, EditorialGateway, JournalistGateway, MembershipGateway, MultimediaGateway,
    PhotoGateway, SectionGateway, TagGateway, WidgetGateway,
};
use crate::handler::GetEditorialHandler;
use crate::orchestrator::{editorial_chain, multimedia_chain};
use crate::pipeline::enrichers::{
    CommentsEnricher, EditorialEnricher, JournalistsEnricher, MembershipEnricher,
    MultimediaEnricher, SectionEnricher, TagsEnricher,
};
use crate::pipeline::EnrichmentPipeline;
use crate::resilience::{CircuitBreakerManager, SystemCircuitBreakerMetrics};
use crate::transformer::default_transformers;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Raw transport gateways, one per upstream
#[derive(Clone)]
pub struct Upstreams {
    pub editorial: Arc<EditorialGateway>,
    pub section: Arc<SectionGateway>,
    pub multimedia: Arc<MultimediaGateway>,
    pub photo: Arc<PhotoGateway>,
    pub widget: Arc<WidgetGateway>,
    pub tags: Arc<TagGateway>,
    pub journalists: Arc<JournalistGateway>,
    pub membership: Arc<MembershipGateway>,
    pub comments: Arc<CommentsGateway>,
}

impl fmt::Debug for Upstreams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upstreams").finish_non_exhaustive()
    }
}

/// Point-in-time engine status
#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub content_types: Vec<String>,
    pub enrichers: Vec<String>,
    pub cache_provider: &'static str,
    pub circuit_breakers: SystemCircuitBreakerMetrics,
    pub health_score: f64,
}

/// Fully wired engine
#[derive(Debug, Clone)]
pub struct EditorialEngine {
    handler: GetEditorialHandler,
    pipeline: Arc<EnrichmentPipeline>,
    resilience: ResilienceLayer,
    content_types: Vec<String>,
}

impl EditorialEngine {
    pub fn handler(&self) -> &GetEditorialHandler {
        &self.handler
    }

    pub fn pipeline(&self) -> &EnrichmentPipeline {
        &self.pipeline
    }

    pub fn breakers(&self) -> &CircuitBreakerManager {
        self.resilience.breakers()
    }

    pub fn resilience(&self) -> &ResilienceLayer {
        &self.resilience
    }

    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            content_types: self.content_types.clone(),
            enrichers: self
                .pipeline
                .enricher_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            cache_provider: self.resilience.cache().provider_name(),
            circuit_breakers: self.breakers().get_system_metrics(),
            health_score: self.breakers().system_health_score(),
        }
    }
}

pub struct EngineBootstrap;

impl EngineBootstrap {
    /// Load configuration from the environment, then bootstrap
    pub fn bootstrap_from_environment(upstreams: Upstreams) -> Result<EditorialEngine> {
        let manager = ConfigManager::load()?;
        info!(environment = manager.environment(), "BOOTSTRAP: configuration loaded");
        Self::bootstrap(manager.config(), upstreams)
    }

    pub fn bootstrap(config: &EdgeConfig, upstreams: Upstreams) -> Result<EditorialEngine> {
        config.validate()?;
        info!(
            breakers = config.circuit_breaker.enabled,
            cache = config.cache.enabled,
            "🚀 BOOTSTRAP: assembling editorial engine"
        );

        let resilience = ResilienceLayer::from_config(config);
        let transformers = Arc::new(default_transformers()?);
        let media = Arc::new(multimedia_chain(
            resilience.wrap(components::PHOTO, upstreams.photo),
            resilience.wrap(components::WIDGET, upstreams.widget),
            transformers,
        )?);

        let pipeline = Arc::new(
            EnrichmentPipeline::from_config(&config.pipeline)
                .with_enricher(Arc::new(EditorialEnricher::new(
                    resilience.wrap(components::EDITORIAL, upstreams.editorial),
                )))
                .with_enricher(Arc::new(SectionEnricher::new(
                    resilience.wrap(components::SECTION, upstreams.section),
                )))
                .with_enricher(Arc::new(MultimediaEnricher::new(
                    resilience.wrap(components::MULTIMEDIA, upstreams.multimedia),
                    media,
                )))
                .with_enricher(Arc::new(TagsEnricher::new(
                    resilience.wrap(components::TAGS, upstreams.tags),
                )))
                .with_enricher(Arc::new(JournalistsEnricher::new(
                    resilience.wrap(components::JOURNALISTS, upstreams.journalists),
                )))
                .with_enricher(Arc::new(MembershipEnricher::new(
                    resilience.wrap(components::MEMBERSHIP, upstreams.membership),
                )))
                .with_enricher(Arc::new(CommentsEnricher::new(
                    resilience.wrap(components::COMMENTS, upstreams.comments),
                ))),
        );

        let orchestrators = Arc::new(editorial_chain(
            content_types::ALL,
            Arc::clone(&pipeline),
            &config.pipeline,
        )?);
        let handler = GetEditorialHandler::new(orchestrators);

        info!(
            enrichers = ?pipeline.enricher_names(),
            content_types = ?content_types::ALL,
            "✅ BOOTSTRAP: editorial engine ready"
        );

        Ok(EditorialEngine {
            handler,
            pipeline,
            resilience,
            content_types: content_types::ALL.iter().map(|t| t.to_string()).collect(),
        })
    }
}
