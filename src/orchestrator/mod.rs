//! # Orchestrators
//!
//! Two dispatch chains sit on top of the pipeline:
//!
//! - [`EditorialOrchestratorChain`]: content type -> orchestrator that runs
//!   the enrichment pipeline in the mode configured for that type
//! - [`MultimediaOrchestratorChain`]: media type -> opening builder used by
//!   the multimedia enricher

pub mod editorial;
pub mod multimedia;

pub use editorial::{
    editorial_chain, EditorialOrchestrator, EditorialOrchestratorChain, PipelineOrchestrator,
};
pub use multimedia::{
    multimedia_chain, EmbedVideoOrchestrator, MultimediaOrchestrator,
    MultimediaOrchestratorChain, PhotoOrchestrator, WidgetOrchestrator,
};
