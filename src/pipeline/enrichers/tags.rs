use crate::constants::{components, priority};
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::gateway::TagGateway;
use crate::models::Tag;
use crate::pipeline::Enricher;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// Resolves tag ids concurrently; output keeps the editorial's tag order and
/// drops ids the upstream does not know
pub struct TagsEnricher {
    gateway: Arc<TagGateway>,
}

impl TagsEnricher {
    pub fn new(gateway: Arc<TagGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Enricher for TagsEnricher {
    fn name(&self) -> &str {
        components::TAGS
    }

    fn priority(&self) -> i32 {
        priority::TAGS
    }

    fn supports(&self, context: &EditorialContext) -> bool {
        context.editorial().is_some_and(|e| e.has_tags())
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError> {
        let tag_ids = context
            .editorial()
            .map(|e| e.tag_ids.clone())
            .unwrap_or_default();

        let lookups = tag_ids.iter().map(|id| self.gateway.find_by_id_async(id));
        let found = join_all(lookups).await;

        let mut tags: Vec<Tag> = Vec::with_capacity(found.len());
        for lookup in found {
            if let Some(tag) = lookup? {
                tags.push(tag);
            }
        }

        context.set_tags(tags)?;
        Ok(())
    }
}
