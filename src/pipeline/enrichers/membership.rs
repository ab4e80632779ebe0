use crate::constants::{components, priority};
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::gateway::MembershipGateway;
use crate::models::MembershipQuery;
use crate::pipeline::Enricher;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Maps every membership card link to its site-specific subscription URL
pub struct MembershipEnricher {
    gateway: Arc<MembershipGateway>,
}

impl MembershipEnricher {
    pub fn new(gateway: Arc<MembershipGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Enricher for MembershipEnricher {
    fn name(&self) -> &str {
        components::MEMBERSHIP
    }

    fn priority(&self) -> i32 {
        priority::MEMBERSHIP
    }

    fn supports(&self, context: &EditorialContext) -> bool {
        context.editorial().is_some_and(|e| e.has_membership_cards())
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError> {
        let (Some(editorial), Some(section)) = (context.editorial(), context.section()) else {
            return Ok(());
        };

        let links = editorial.membership_links();
        if links.is_empty() {
            return Ok(());
        }

        let query = MembershipQuery {
            editorial_id: editorial.id.clone(),
            links,
            site_name: section.site.clone(),
        };

        let resolved = self
            .gateway
            .find_by_id_async(&query)
            .await?
            .unwrap_or_default();
        if resolved.is_empty() {
            return Ok(());
        }
        if resolved.len() != query.links.len() {
            return Err(PipelineError::gateway(
                components::MEMBERSHIP,
                format!(
                    "resolved {} urls for {} links",
                    resolved.len(),
                    query.links.len()
                ),
            ));
        }

        let links: BTreeMap<String, String> = query.links.into_iter().zip(resolved).collect();
        context.set_membership_links(links)?;
        Ok(())
    }
}
