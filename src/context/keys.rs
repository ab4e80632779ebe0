//! Typed context keys
//!
//! A key carries the type of the value stored under it, so a typed read can
//! never observe a value of another type. The string name is what `has`
//! checks and what shows up in logs.

use crate::models::{
    Editorial, Journalist, Multimedia, MultimediaOpening, Photo, Section, Tag,
};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

pub struct ContextKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextKey").field(&self.name).finish()
    }
}

pub const EDITORIAL: ContextKey<Editorial> = ContextKey::new("editorial");
pub const SECTION: ContextKey<Section> = ContextKey::new("section");
pub const MULTIMEDIA: ContextKey<Multimedia> = ContextKey::new("multimedia");
pub const MULTIMEDIA_OPENING: ContextKey<MultimediaOpening> =
    ContextKey::new("multimedia_opening");
pub const TAGS: ContextKey<Vec<Tag>> = ContextKey::new("tags");
/// Journalists keyed by signature alias
pub const JOURNALISTS: ContextKey<BTreeMap<String, Journalist>> = ContextKey::new("journalists");
pub const COMMENTS_COUNT: ContextKey<u64> = ContextKey::new("comments_count");
/// Membership link to resolved subscription URL
pub const MEMBERSHIP_LINKS: ContextKey<BTreeMap<String, String>> =
    ContextKey::new("membership_links");
/// Photos referenced from the body, keyed by photo id
pub const BODY_PHOTOS: ContextKey<BTreeMap<String, Photo>> = ContextKey::new("body_photos");
/// Editorials embedded in the body, keyed by editorial id
pub const INSERTED_NEWS: ContextKey<BTreeMap<String, Editorial>> =
    ContextKey::new("inserted_news");
