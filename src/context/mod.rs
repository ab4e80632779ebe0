//! # Editorial Context
//!
//! Per-request aggregate the enrichers write into. Values live behind typed
//! keys ([`keys`]) so the set of concerns stays open: a new enricher can
//! introduce its own `ContextKey<T>` without touching this type. The price is
//! a runtime type check on every read, which the key's type parameter makes
//! infallible for well-behaved callers.
//!
//! Once a name is written with one type it keeps that type for the lifetime
//! of the context; writing another type under the same name is rejected.

pub mod keys;

pub use keys::ContextKey;

use crate::error::PipelineError;
use crate::models::{
    Editorial, EditorialId, Journalist, Multimedia, MultimediaOpening, Photo, Section, Tag,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::any::{type_name, Any};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

static EMPTY_JOURNALISTS: BTreeMap<String, Journalist> = BTreeMap::new();
static EMPTY_LINKS: BTreeMap<String, String> = BTreeMap::new();
static EMPTY_PHOTOS: BTreeMap<String, Photo> = BTreeMap::new();
static EMPTY_EDITORIALS: BTreeMap<String, Editorial> = BTreeMap::new();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context key '{key}' holds {stored}, cannot store {attempted}")]
    TypeMismatch {
        key: String,
        stored: String,
        attempted: String,
    },
}

struct Slot {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

/// A non-critical failure the pipeline absorbed
#[derive(Debug, Clone, Serialize)]
pub struct Degradation {
    pub enricher: String,
    pub error: PipelineError,
}

pub struct EditorialContext {
    editorial_id: EditorialId,
    request_id: Uuid,
    created_at: DateTime<Utc>,
    values: HashMap<&'static str, Slot>,
    degradations: Vec<Degradation>,
}

impl fmt::Debug for EditorialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("EditorialContext")
            .field("editorial_id", &self.editorial_id)
            .field("request_id", &self.request_id)
            .field("keys", &keys)
            .field("degradations", &self.degradations.len())
            .finish()
    }
}

impl EditorialContext {
    pub fn new(editorial_id: EditorialId) -> Self {
        Self {
            editorial_id,
            request_id: Uuid::new_v4(),
            created_at: Utc::now(),
            values: HashMap::new(),
            degradations: Vec::new(),
        }
    }

    /// Parse and seed in one step
    pub fn for_id(raw_id: &str) -> Result<Self, PipelineError> {
        Ok(Self::new(EditorialId::parse(raw_id)?))
    }

    pub fn editorial_id(&self) -> &EditorialId {
        &self.editorial_id
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn get_ref<T: Any>(&self, key: ContextKey<T>) -> Option<&T> {
        self.values
            .get(key.name())
            .and_then(|slot| slot.value.downcast_ref::<T>())
    }

    /// Stored value, or `default` when absent or stored with another type
    pub fn get<T: Any + Clone>(&self, key: ContextKey<T>, default: T) -> T {
        self.get_ref(key).cloned().unwrap_or(default)
    }

    pub fn set<T: Any + Send + Sync>(
        &mut self,
        key: ContextKey<T>,
        value: T,
    ) -> Result<(), ContextError> {
        let attempted = type_name::<T>();
        if let Some(existing) = self.values.get(key.name()) {
            if !existing.value.is::<T>() {
                return Err(ContextError::TypeMismatch {
                    key: key.name().to_string(),
                    stored: existing.type_name.to_string(),
                    attempted: attempted.to_string(),
                });
            }
        }

        self.values.insert(
            key.name(),
            Slot {
                type_name: attempted,
                value: Box::new(value),
            },
        );
        Ok(())
    }

    /// Generic presence; says nothing about the stored type
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.values.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn record_degradation(&mut self, enricher: &str, error: PipelineError) {
        self.degradations.push(Degradation {
            enricher: enricher.to_string(),
            error,
        });
    }

    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    // Typed accessors

    pub fn editorial(&self) -> Option<&Editorial> {
        self.get_ref(keys::EDITORIAL)
    }

    pub fn set_editorial(&mut self, editorial: Editorial) -> Result<(), ContextError> {
        self.set(keys::EDITORIAL, editorial)
    }

    pub fn has_editorial(&self) -> bool {
        self.editorial().is_some()
    }

    pub fn section(&self) -> Option<&Section> {
        self.get_ref(keys::SECTION)
    }

    pub fn set_section(&mut self, section: Section) -> Result<(), ContextError> {
        self.set(keys::SECTION, section)
    }

    pub fn has_section(&self) -> bool {
        self.section().is_some()
    }

    pub fn multimedia(&self) -> Option<&Multimedia> {
        self.get_ref(keys::MULTIMEDIA)
    }

    pub fn set_multimedia(&mut self, multimedia: Multimedia) -> Result<(), ContextError> {
        self.set(keys::MULTIMEDIA, multimedia)
    }

    pub fn has_multimedia(&self) -> bool {
        self.multimedia().is_some()
    }

    pub fn multimedia_opening(&self) -> Option<&MultimediaOpening> {
        self.get_ref(keys::MULTIMEDIA_OPENING)
    }

    pub fn set_multimedia_opening(
        &mut self,
        opening: MultimediaOpening,
    ) -> Result<(), ContextError> {
        self.set(keys::MULTIMEDIA_OPENING, opening)
    }

    pub fn tags(&self) -> &[Tag] {
        self.get_ref(keys::TAGS).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) -> Result<(), ContextError> {
        self.set(keys::TAGS, tags)
    }

    pub fn has_tags(&self) -> bool {
        !self.tags().is_empty()
    }

    pub fn journalists(&self) -> &BTreeMap<String, Journalist> {
        self.get_ref(keys::JOURNALISTS).unwrap_or(&EMPTY_JOURNALISTS)
    }

    pub fn journalist(&self, alias_id: &str) -> Option<&Journalist> {
        self.journalists().get(alias_id)
    }

    pub fn set_journalists(
        &mut self,
        journalists: BTreeMap<String, Journalist>,
    ) -> Result<(), ContextError> {
        self.set(keys::JOURNALISTS, journalists)
    }

    pub fn has_journalists(&self) -> bool {
        !self.journalists().is_empty()
    }

    pub fn comments_count(&self) -> u64 {
        self.get(keys::COMMENTS_COUNT, 0)
    }

    pub fn set_comments_count(&mut self, count: u64) -> Result<(), ContextError> {
        self.set(keys::COMMENTS_COUNT, count)
    }

    pub fn membership_links(&self) -> &BTreeMap<String, String> {
        self.get_ref(keys::MEMBERSHIP_LINKS).unwrap_or(&EMPTY_LINKS)
    }

    pub fn set_membership_links(
        &mut self,
        links: BTreeMap<String, String>,
    ) -> Result<(), ContextError> {
        self.set(keys::MEMBERSHIP_LINKS, links)
    }

    pub fn has_membership_links(&self) -> bool {
        !self.membership_links().is_empty()
    }

    pub fn body_photos(&self) -> &BTreeMap<String, Photo> {
        self.get_ref(keys::BODY_PHOTOS).unwrap_or(&EMPTY_PHOTOS)
    }

    pub fn set_body_photos(&mut self, photos: BTreeMap<String, Photo>) -> Result<(), ContextError> {
        self.set(keys::BODY_PHOTOS, photos)
    }

    pub fn inserted_news(&self) -> &BTreeMap<String, Editorial> {
        self.get_ref(keys::INSERTED_NEWS)
            .unwrap_or(&EMPTY_EDITORIALS)
    }

    pub fn set_inserted_news(
        &mut self,
        news: BTreeMap<String, Editorial>,
    ) -> Result<(), ContextError> {
        self.set(keys::INSERTED_NEWS, news)
    }
}
