use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated editorial identifier
///
/// Non-empty, trimmed. Seeds every pipeline context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorialId(String);

impl EditorialId {
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::validation_failed(
                "Editorial id must not be empty",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EditorialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EditorialId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Draft,
    Scheduled,
    Published,
}

/// Author signature; resolved to a journalist by alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub alias_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipButton {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub url_membership: String,
}

/// Membership card embedded in the editorial body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipCard {
    #[serde(default)]
    pub buttons: Vec<MembershipButton>,
}

impl MembershipCard {
    /// Non-empty links in button order, membership link first
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.buttons
            .iter()
            .flat_map(|b| [b.url_membership.as_str(), b.url.as_str()])
            .filter(|link| !link.is_empty())
    }
}

/// Core editorial document as returned by the editorial upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Editorial {
    pub id: String,
    pub editorial_type: String,
    pub title: String,
    pub section_id: String,
    #[serde(default)]
    pub multimedia_id: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    #[serde(default)]
    pub membership_cards: Vec<MembershipCard>,
    pub status: PublicationStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default = "enabled")]
    pub commentable: bool,
    #[serde(default = "enabled")]
    pub indexable: bool,
}

fn enabled() -> bool {
    true
}

impl Editorial {
    /// Published and past its publication date, if it has one
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.status == PublicationStatus::Published
            && self.published_at.map_or(true, |published_at| published_at <= now)
    }

    /// Opening multimedia id, if the editorial has a non-empty one
    pub fn opening_multimedia_id(&self) -> Option<&str> {
        self.multimedia_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn has_signatures(&self) -> bool {
        !self.signatures.is_empty()
    }

    pub fn has_tags(&self) -> bool {
        !self.tag_ids.is_empty()
    }

    pub fn has_membership_cards(&self) -> bool {
        !self.membership_cards.is_empty()
    }

    pub fn membership_links(&self) -> Vec<String> {
        self.membership_cards
            .iter()
            .flat_map(MembershipCard::links)
            .map(str::to_string)
            .collect()
    }
}
