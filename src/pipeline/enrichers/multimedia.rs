use crate::constants::{components, priority};
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::gateway::MultimediaGateway;
use crate::orchestrator::MultimediaOrchestratorChain;
use crate::pipeline::Enricher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Fetches the opening multimedia and builds its opening through the
/// media-type chain
pub struct MultimediaEnricher {
    gateway: Arc<MultimediaGateway>,
    orchestrators: Arc<MultimediaOrchestratorChain>,
}

impl MultimediaEnricher {
    pub fn new(
        gateway: Arc<MultimediaGateway>,
        orchestrators: Arc<MultimediaOrchestratorChain>,
    ) -> Self {
        Self {
            gateway,
            orchestrators,
        }
    }
}

#[async_trait]
impl Enricher for MultimediaEnricher {
    fn name(&self) -> &str {
        components::MULTIMEDIA
    }

    fn priority(&self) -> i32 {
        priority::MULTIMEDIA
    }

    fn supports(&self, context: &EditorialContext) -> bool {
        context
            .editorial()
            .and_then(|e| e.opening_multimedia_id())
            .is_some()
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError> {
        let Some(multimedia_id) = context
            .editorial()
            .and_then(|e| e.opening_multimedia_id())
            .map(str::to_string)
        else {
            return Ok(());
        };

        let Some(multimedia) = self.gateway.find_by_id_async(&multimedia_id).await? else {
            debug!(multimedia_id = %multimedia_id, "Opening multimedia not found");
            return Ok(());
        };

        let opening = self
            .orchestrators
            .resolve(multimedia.media_type())?
            .build_opening(&multimedia)
            .await?;

        context.set_multimedia(multimedia)?;
        if let Some(opening) = opening {
            context.set_multimedia_opening(opening)?;
        }
        Ok(())
    }
}
