//! Request entry point

use crate::constants::content_types;
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::logging::log_error;
use crate::orchestrator::EditorialOrchestratorChain;
use crate::result::ResultExt;
use std::sync::Arc;
use tracing::{info, instrument};

/// Resolves one editorial request into an enriched context
///
/// The content type picks the orchestrator; each orchestrator owns the mode
/// its pipeline runs in.
#[derive(Debug, Clone)]
pub struct GetEditorialHandler {
    orchestrators: Arc<EditorialOrchestratorChain>,
    default_content_type: String,
}

impl GetEditorialHandler {
    pub fn new(orchestrators: Arc<EditorialOrchestratorChain>) -> Self {
        Self {
            orchestrators,
            default_content_type: content_types::NEWS.to_string(),
        }
    }

    #[must_use]
    pub fn with_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    /// Serve `raw_id` with the default content type
    pub async fn handle(&self, raw_id: &str) -> Result<EditorialContext, PipelineError> {
        self.handle_as(raw_id, &self.default_content_type).await
    }

    #[instrument(skip(self))]
    pub async fn handle_as(
        &self,
        raw_id: &str,
        content_type: &str,
    ) -> Result<EditorialContext, PipelineError> {
        let context = EditorialContext::for_id(raw_id)?;
        let orchestrator = self.orchestrators.resolve(content_type)?;

        orchestrator
            .execute(context)
            .await
            .on_success(|ctx| {
                info!(
                    editorial_id = %ctx.editorial_id(),
                    degradations = ctx.degradations().len(),
                    "Editorial served"
                )
            })
            .on_failure(|e| {
                log_error("handler", "get_editorial", e.message(), Some(e.code().as_str()))
            })
    }
}
