//! # Editorial Specifications
//!
//! Small composable predicates over domain objects. The editorial enricher
//! uses [`EditorialIsAvailable`] to decide whether a fetched editorial may be
//! served at all.
//!
//! ```rust
//! use editorial_core::specification::{EditorialIsNotDeleted, EditorialIsPublished, Specification};
//!
//! let servable = EditorialIsPublished::now().and(EditorialIsNotDeleted);
//! # let _ = servable;
//! ```

use crate::error::PipelineError;
use crate::models::Editorial;
use chrono::{DateTime, Utc};

pub trait Specification<T: ?Sized> {
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    fn and<S>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        And(self, other)
    }

    fn or<S>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        Or(self, other)
    }

    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(A, B);

#[derive(Debug, Clone, Copy)]
pub struct Not<A>(A);

impl<T: ?Sized, A: Specification<T>, B: Specification<T>> Specification<T> for And<A, B> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) && self.1.is_satisfied_by(candidate)
    }
}

impl<T: ?Sized, A: Specification<T>, B: Specification<T>> Specification<T> for Or<A, B> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) || self.1.is_satisfied_by(candidate)
    }
}

impl<T: ?Sized, A: Specification<T>> Specification<T> for Not<A> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.0.is_satisfied_by(candidate)
    }
}

/// Visible at the reference instant
#[derive(Debug, Clone, Copy)]
pub struct EditorialIsPublished {
    at: DateTime<Utc>,
}

impl EditorialIsPublished {
    pub fn at(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}

impl Specification<Editorial> for EditorialIsPublished {
    fn is_satisfied_by(&self, candidate: &Editorial) -> bool {
        candidate.is_visible_at(self.at)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EditorialIsNotDeleted;

impl Specification<Editorial> for EditorialIsNotDeleted {
    fn is_satisfied_by(&self, candidate: &Editorial) -> bool {
        !candidate.deleted
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EditorialIsCommentable;

impl Specification<Editorial> for EditorialIsCommentable {
    fn is_satisfied_by(&self, candidate: &Editorial) -> bool {
        candidate.commentable
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EditorialIsIndexable;

impl Specification<Editorial> for EditorialIsIndexable {
    fn is_satisfied_by(&self, candidate: &Editorial) -> bool {
        candidate.indexable
    }
}

/// Published AND not deleted
#[derive(Debug, Clone, Copy)]
pub struct EditorialIsAvailable {
    inner: And<EditorialIsPublished, EditorialIsNotDeleted>,
}

impl EditorialIsAvailable {
    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            inner: EditorialIsPublished::at(at).and(EditorialIsNotDeleted),
        }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Like [`Specification::is_satisfied_by`], but says why not
    ///
    /// Deleted editorials read as absent; existing but unpublished ones
    /// fail with `NotPublished`.
    pub fn check(&self, editorial: &Editorial) -> Result<(), PipelineError> {
        if self.is_satisfied_by(editorial) {
            return Ok(());
        }
        if !EditorialIsNotDeleted.is_satisfied_by(editorial) {
            return Err(PipelineError::not_found("editorial", &editorial.id));
        }
        Err(PipelineError::not_published(&editorial.id))
    }
}

impl Specification<Editorial> for EditorialIsAvailable {
    fn is_satisfied_by(&self, candidate: &Editorial) -> bool {
        self.inner.is_satisfied_by(candidate)
    }
}
