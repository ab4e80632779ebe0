use crate::constants::{components, priority};
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::gateway::EditorialGateway;
use crate::pipeline::Enricher;
use crate::specification::EditorialIsAvailable;
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches the editorial itself and refuses unavailable ones
pub struct EditorialEnricher {
    gateway: Arc<EditorialGateway>,
}

impl EditorialEnricher {
    pub fn new(gateway: Arc<EditorialGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Enricher for EditorialEnricher {
    fn name(&self) -> &str {
        components::EDITORIAL
    }

    fn priority(&self) -> i32 {
        priority::CORE
    }

    fn supports(&self, _context: &EditorialContext) -> bool {
        true
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError> {
        let id = context.editorial_id().as_str();
        let editorial = self
            .gateway
            .find_by_id_async(id)
            .await?
            .ok_or_else(|| PipelineError::not_found("editorial", id))?;

        EditorialIsAvailable::now().check(&editorial)?;

        context.set_editorial(editorial)?;
        Ok(())
    }
}
