//! Enricher contract

use crate::context::EditorialContext;
use crate::error::PipelineError;
use async_trait::async_trait;
use std::fmt;

/// One unit of enrichment: adds one concern's data to the context
///
/// Priority only schedules; dependencies between enrichers are expressed by
/// giving the dependent a lower priority than what it reads.
#[async_trait]
pub trait Enricher: Send + Sync {
    fn name(&self) -> &str;

    /// Higher runs first
    fn priority(&self) -> i32;

    fn supports(&self, context: &EditorialContext) -> bool;

    /// Fallible form of [`Self::supports`]; the pipeline calls this one
    ///
    /// An `Err` is treated as "not supported" and the enricher is skipped.
    fn try_supports(&self, context: &EditorialContext) -> Result<bool, PipelineError> {
        Ok(self.supports(context))
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError>;
}

type SupportsFn = dyn Fn(&EditorialContext) -> Result<bool, PipelineError> + Send + Sync;
type EffectFn = dyn Fn(&mut EditorialContext) -> Result<(), PipelineError> + Send + Sync;

/// Enricher assembled from closures with a synchronous effect
///
/// ```rust
/// use editorial_core::pipeline::FnEnricher;
///
/// let counter = FnEnricher::new("default-comments", 40)
///     .supports_when(|ctx| ctx.has_editorial())
///     .effect(|ctx| ctx.set_comments_count(0).map_err(Into::into));
/// # let _ = counter;
/// ```
pub struct FnEnricher {
    name: String,
    priority: i32,
    supports: Box<SupportsFn>,
    effect: Box<EffectFn>,
}

impl fmt::Debug for FnEnricher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEnricher")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

impl FnEnricher {
    /// Always supported, no effect until [`Self::effect`] is set
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            priority,
            supports: Box::new(|_| Ok(true)),
            effect: Box::new(|_| Ok(())),
        }
    }

    #[must_use]
    pub fn supports_when(
        mut self,
        predicate: impl Fn(&EditorialContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.supports = Box::new(move |ctx| Ok(predicate(ctx)));
        self
    }

    #[must_use]
    pub fn try_supports_when(
        mut self,
        predicate: impl Fn(&EditorialContext) -> Result<bool, PipelineError> + Send + Sync + 'static,
    ) -> Self {
        self.supports = Box::new(predicate);
        self
    }

    #[must_use]
    pub fn effect(
        mut self,
        effect: impl Fn(&mut EditorialContext) -> Result<(), PipelineError> + Send + Sync + 'static,
    ) -> Self {
        self.effect = Box::new(effect);
        self
    }
}

#[async_trait]
impl Enricher for FnEnricher {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supports(&self, context: &EditorialContext) -> bool {
        (self.supports)(context).unwrap_or(false)
    }

    fn try_supports(&self, context: &EditorialContext) -> Result<bool, PipelineError> {
        (self.supports)(context)
    }

    async fn enrich(&self, context: &mut EditorialContext) -> Result<(), PipelineError> {
        (self.effect)(context)
    }
}
