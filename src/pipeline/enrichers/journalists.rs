use crate::constants::{components, priority};
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::gateway::JournalistGateway;
use crate::pipeline::Enricher;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resolves signature aliases into journalists keyed by alias id
pub struct JournalistsEnricher {
    gateway: Arc<JournalistGateway>,
}

impl JournalistsEnricher {
    pub fn new(gateway: Arc<JournalistGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Enricher for JournalistsEnricher {
    fn name(&self) -> &str {
        components::JOURNALISTS
    }

    fn priority(&self) -> i32 {
        priority::JOURNALISTS
    }

    fn supports(&self, context: &EditorialContext) -> bool {
        context.editorial().is_some_and(|e| e.has_signatures())
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError> {
        let aliases: Vec<String> = context
            .editorial()
            .map(|e| e.signatures.iter().map(|s| s.alias_id.clone()).collect())
            .unwrap_or_default();

        let found = join_all(
            aliases
                .iter()
                .map(|alias| self.gateway.find_by_id_async(alias)),
        )
        .await;

        let mut journalists = BTreeMap::new();
        for (alias, lookup) in aliases.into_iter().zip(found) {
            if let Some(journalist) = lookup? {
                journalists.insert(alias, journalist);
            }
        }

        context.set_journalists(journalists)?;
        Ok(())
    }
}
