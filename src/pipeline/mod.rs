//! # Enrichment Pipeline
//!
//! Runs every registered [`Enricher`] against one [`EditorialContext`] in
//! descending priority order. Ties keep registration order.
//!
//! ```text
//! for each enricher (priority desc, stable):
//!   try_supports? ── false / Err ──> on_skip, next
//!        │ true
//!   enrich ── Ok ──> on_success, next
//!        │ Err
//!   Strict                      -> stop, Err(first failure)
//!   Graceful, priority >= crit  -> stop, Err(failure)
//!   Graceful, below crit        -> record degradation, next
//! ```

pub mod enricher;
pub mod enrichers;
pub mod observer;

pub use enricher::{Enricher, FnEnricher};
pub use observer::{NoopObserver, PipelineObserver, TracingObserver};

use crate::config::PipelineSection;
use crate::constants::priority;
use crate::context::EditorialContext;
use crate::error::PipelineError;
use crate::logging::log_pipeline_operation;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Absorb non-critical failures
    #[default]
    Graceful,
    /// Stop at the first failure
    Strict,
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineMode::Graceful => f.write_str("graceful"),
            PipelineMode::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Clone)]
pub struct EnrichmentPipeline {
    enrichers: Vec<Arc<dyn Enricher>>,
    observer: Arc<dyn PipelineObserver>,
    critical_threshold: i32,
}

impl fmt::Debug for EnrichmentPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentPipeline")
            .field("enrichers", &self.enricher_names())
            .field("critical_threshold", &self.critical_threshold)
            .finish()
    }
}

impl Default for EnrichmentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrichmentPipeline {
    pub fn new() -> Self {
        Self {
            enrichers: Vec::new(),
            observer: Arc::new(TracingObserver),
            critical_threshold: priority::CRITICAL_THRESHOLD,
        }
    }

    pub fn from_config(config: &PipelineSection) -> Self {
        Self::new().with_critical_threshold(config.critical_threshold)
    }

    #[must_use]
    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.add_enricher(enricher);
        self
    }

    pub fn add_enricher(&mut self, enricher: Arc<dyn Enricher>) {
        debug!(
            enricher = enricher.name(),
            priority = enricher.priority(),
            "Enricher registered"
        );
        self.enrichers.push(enricher);
        // sort_by_key is stable: equal priorities keep registration order
        self.enrichers.sort_by_key(|e| Reverse(e.priority()));
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn with_critical_threshold(mut self, threshold: i32) -> Self {
        self.critical_threshold = threshold;
        self
    }

    pub fn critical_threshold(&self) -> i32 {
        self.critical_threshold
    }

    /// Names in execution order
    pub fn enricher_names(&self) -> Vec<&str> {
        self.enrichers.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.enrichers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enrichers.is_empty()
    }

    pub fn is_critical(&self, enricher: &dyn Enricher) -> bool {
        enricher.priority() >= self.critical_threshold
    }

    /// Graceful run
    pub async fn process(
        &self,
        context: EditorialContext,
    ) -> Result<EditorialContext, PipelineError> {
        self.run(context, PipelineMode::Graceful).await
    }

    pub async fn process_strict(
        &self,
        context: EditorialContext,
    ) -> Result<EditorialContext, PipelineError> {
        self.run(context, PipelineMode::Strict).await
    }

    #[instrument(
        skip_all,
        fields(editorial_id = %context.editorial_id(), request_id = %context.request_id(), mode = %mode)
    )]
    pub async fn run(
        &self,
        mut context: EditorialContext,
        mode: PipelineMode,
    ) -> Result<EditorialContext, PipelineError> {
        let context_id = context.editorial_id().to_string();

        for enricher in &self.enrichers {
            let name = enricher.name();

            let supported = match enricher.try_supports(&context) {
                Ok(supported) => supported,
                Err(error) => {
                    warn!(
                        enricher = name,
                        code = %error.code(),
                        error = %error.message(),
                        "Support check failed, skipping enricher"
                    );
                    false
                }
            };

            if !supported {
                self.observer.on_skip(name, &context_id);
                continue;
            }

            match enricher.enrich(&mut context).await {
                Ok(()) => self.observer.on_success(name, &context_id),
                Err(error) => {
                    self.observer.on_failure(name, &context_id, &error);

                    let fatal = match mode {
                        PipelineMode::Strict => true,
                        PipelineMode::Graceful => self.is_critical(enricher.as_ref()),
                    };

                    if fatal {
                        log_pipeline_operation("run", &context_id, Some(name), "aborted", Some(error.message()));
                        return Err(error.with_context("enricher", name));
                    }
                    context.record_degradation(name, error);
                }
            }
        }

        let status = if context.is_degraded() { "degraded" } else { "completed" };
        log_pipeline_operation("run", &context_id, None, status, None);
        Ok(context)
    }
}
