use crate::constants::{components, priority};
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::gateway::CommentsGateway;
use crate::pipeline::Enricher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Comment count; any upstream failure reads as zero comments
pub struct CommentsEnricher {
    gateway: Arc<CommentsGateway>,
}

impl CommentsEnricher {
    pub fn new(gateway: Arc<CommentsGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Enricher for CommentsEnricher {
    fn name(&self) -> &str {
        components::COMMENTS
    }

    fn priority(&self) -> i32 {
        priority::COMMENTS
    }

    fn supports(&self, context: &EditorialContext) -> bool {
        context.has_editorial()
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError> {
        let count = match self
            .gateway
            .find_by_id_async(context.editorial_id().as_str())
            .await
        {
            Ok(Some(count)) => count.total_records,
            Ok(None) => 0,
            Err(e) => {
                warn!(editorial_id = %context.editorial_id(), error = %e, "Comment count unavailable, using 0");
                0
            }
        };

        context.set_comments_count(count)?;
        Ok(())
    }
}
