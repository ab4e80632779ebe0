use crate::config::PipelineSection;
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::pipeline::{EnrichmentPipeline, PipelineMode};
use crate::registry::{Discriminant, DispatchRegistry, RegistryError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Serves one editorial content type
#[async_trait]
pub trait EditorialOrchestrator: Discriminant + Send + Sync {
    async fn execute(&self, context: EditorialContext) -> Result<EditorialContext, PipelineError>;
}

pub type EditorialOrchestratorChain = DispatchRegistry<dyn EditorialOrchestrator>;

/// Runs a shared pipeline in a fixed mode
#[derive(Debug, Clone)]
pub struct PipelineOrchestrator {
    content_type: String,
    pipeline: Arc<EnrichmentPipeline>,
    mode: PipelineMode,
}

impl PipelineOrchestrator {
    pub fn new(
        content_type: impl Into<String>,
        pipeline: Arc<EnrichmentPipeline>,
        mode: PipelineMode,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            pipeline,
            mode,
        }
    }

    pub fn mode(&self) -> PipelineMode {
        self.mode
    }
}

impl Discriminant for PipelineOrchestrator {
    fn discriminant(&self) -> &str {
        &self.content_type
    }
}

#[async_trait]
impl EditorialOrchestrator for PipelineOrchestrator {
    #[instrument(skip_all, fields(content_type = %self.content_type, mode = %self.mode))]
    async fn execute(&self, context: EditorialContext) -> Result<EditorialContext, PipelineError> {
        let context = self.pipeline.run(context, self.mode).await?;
        info!(
            editorial_id = %context.editorial_id(),
            degraded = context.is_degraded(),
            "Editorial orchestrated"
        );
        Ok(context)
    }
}

/// One [`PipelineOrchestrator`] per content type, all sharing `pipeline`
pub fn editorial_chain(
    content_types: &[&str],
    pipeline: Arc<EnrichmentPipeline>,
    config: &PipelineSection,
) -> Result<EditorialOrchestratorChain, RegistryError> {
    let mut chain: EditorialOrchestratorChain = DispatchRegistry::new("editorial_orchestrators");
    for content_type in content_types {
        let mode = config.mode_for(content_type);
        chain.register_handler(Arc::new(PipelineOrchestrator::new(
            *content_type,
            Arc::clone(&pipeline),
            mode,
        )))?;
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::content_types;
    use crate::pipeline::FnEnricher;
    use std::collections::HashMap;

    fn pipeline() -> Arc<EnrichmentPipeline> {
        Arc::new(
            EnrichmentPipeline::new().with_enricher(Arc::new(
                FnEnricher::new("tags", 70)
                    .effect(|_| Err(PipelineError::gateway("tags", "connection refused"))),
            )),
        )
    }

    fn config() -> PipelineSection {
        PipelineSection {
            content_modes: HashMap::from([(content_types::OPINION.to_string(), PipelineMode::Strict)]),
            ..PipelineSection::default()
        }
    }

    #[tokio::test]
    async fn test_mode_follows_content_type() {
        let chain = editorial_chain(content_types::ALL, pipeline(), &config()).unwrap();

        let news = chain.resolve(content_types::NEWS).unwrap();
        let ctx = news
            .execute(EditorialContext::for_id("4433").unwrap())
            .await
            .unwrap();
        assert!(ctx.is_degraded());

        let opinion = chain.resolve(content_types::OPINION).unwrap();
        assert!(opinion
            .execute(EditorialContext::for_id("4433").unwrap())
            .await
            .is_err());
    }

    #[test]
    fn test_duplicate_content_type_is_rejected() {
        let result = editorial_chain(&["news", "news"], pipeline(), &config());
        assert!(matches!(result, Err(RegistryError::Duplicate { .. })));
    }
}
