//! Pipeline observation hooks
//!
//! Callbacks are fire-and-forget: they return nothing and the pipeline never
//! waits on or inspects them.

use crate::error::PipelineError;
use tracing::{debug, error, info};

pub trait PipelineObserver: Send + Sync {
    fn on_skip(&self, enricher: &str, context_id: &str);

    fn on_success(&self, enricher: &str, context_id: &str);

    fn on_failure(&self, enricher: &str, context_id: &str, error: &PipelineError);
}

/// Default observer: structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_skip(&self, enricher: &str, context_id: &str) {
        debug!(enricher, editorial_id = context_id, "Enricher skipped");
    }

    fn on_success(&self, enricher: &str, context_id: &str) {
        info!(enricher, editorial_id = context_id, "Enricher completed");
    }

    fn on_failure(&self, enricher: &str, context_id: &str, error: &PipelineError) {
        error!(
            enricher,
            editorial_id = context_id,
            code = %error.code(),
            error = %error.message(),
            "Enricher failed"
        );
    }
}

/// Discards every observation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_skip(&self, _enricher: &str, _context_id: &str) {}

    fn on_success(&self, _enricher: &str, _context_id: &str) {}

    fn on_failure(&self, _enricher: &str, _context_id: &str, _error: &PipelineError) {}
}
