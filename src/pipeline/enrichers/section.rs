use crate::constants::{components, priority};
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::gateway::SectionGateway;
use crate::pipeline::Enricher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

pub struct SectionEnricher {
    gateway: Arc<SectionGateway>,
}

impl SectionEnricher {
    pub fn new(gateway: Arc<SectionGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Enricher for SectionEnricher {
    fn name(&self) -> &str {
        components::SECTION
    }

    fn priority(&self) -> i32 {
        priority::SECTION
    }

    fn supports(&self, context: &EditorialContext) -> bool {
        context.has_editorial()
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError> {
        let Some(section_id) = context.editorial().map(|e| e.section_id.clone()) else {
            return Ok(());
        };

        match self.gateway.find_by_id_async(&section_id).await? {
            Some(section) => context.set_section(section)?,
            None => warn!(section_id = %section_id, "Section not found"),
        }
        Ok(())
    }
}
