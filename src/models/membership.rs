use crate::gateway::GatewayKey;
use serde::{Deserialize, Serialize};

/// Membership URL resolution request
///
/// The cache key covers every identifying argument, links included, so two
/// editorials with different cards never share an entry. Each part is length
/// prefixed, so no link content can collide with the separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipQuery {
    pub editorial_id: String,
    pub links: Vec<String>,
    pub site_name: String,
}

impl GatewayKey for MembershipQuery {
    fn cache_key(&self) -> String {
        [&self.editorial_id, &self.site_name]
            .into_iter()
            .chain(&self.links)
            .map(|part| format!("{}:{part}", part.len()))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Engagement counters for an editorial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentCount {
    pub total_records: u64,
}
