#![allow(clippy::doc_markdown)] // Allow technical terms in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Editorial Core
//!
//! Enrichment engine and resilience layer for the editorial edge service.
//!
//! ## Overview
//!
//! A request for one editorial becomes an [`context::EditorialContext`] that a
//! priority-ordered [`pipeline::EnrichmentPipeline`] fills from several
//! upstream services: the editorial itself, its section, opening multimedia,
//! tags, journalists, membership links and comment count. Every upstream is
//! reached through a [`gateway::Gateway`] port, usually wrapped in a cache
//! and a circuit breaker.
//!
//! ## Architecture
//!
//! ```text
//! GetEditorialHandler
//!   └── editorial orchestrator chain (content type -> pipeline mode)
//!         └── EnrichmentPipeline (priority desc, graceful | strict)
//!               └── Enricher ── CachedGateway ── CircuitBreakerGateway ── upstream
//! ```
//!
//! ## Module Organization
//!
//! - [`result`] - Result combinators and collections
//! - [`error`] - Structured error handling
//! - [`models`] - Domain objects returned by the upstreams
//! - [`gateway`] - Upstream ports and their decorators
//! - [`resilience`] - Circuit breaker state machine, metrics and manager
//! - [`cache`] - Cache providers behind the caching decorator
//! - [`context`] - Per-request enrichment context
//! - [`pipeline`] - Enricher contract, pipeline and the built-in enrichers
//! - [`registry`] - Discriminant-keyed dispatch registries
//! - [`orchestrator`] - Editorial and multimedia orchestrator chains
//! - [`transformer`] - Widget detail transformers
//! - [`specification`] - Composable editorial predicates
//! - [`handler`] - Request entry point
//! - [`bootstrap`] - Engine assembly from configuration
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use editorial_core::bootstrap::{EngineBootstrap, Upstreams};
//!
//! # async fn example(upstreams: Upstreams) -> Result<(), Box<dyn std::error::Error>> {
//! editorial_core::logging::init_structured_logging();
//!
//! let engine = EngineBootstrap::bootstrap_from_environment(upstreams)?;
//! let context = engine.handler().handle("4433").await?;
//!
//! println!("{:?}", context.editorial().map(|e| &e.title));
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod pipeline;
pub mod registry;
pub mod resilience;
pub mod result;
pub mod specification;
pub mod transformer;

pub use bootstrap::{EditorialEngine, EngineBootstrap, Upstreams};
pub use context::EditorialContext;
pub use error::{EdgeError, ErrorCode, PipelineError, Result};
pub use gateway::{Gateway, GatewayError};
pub use handler::GetEditorialHandler;
pub use pipeline::{Enricher, EnrichmentPipeline, PipelineMode};
pub use registry::{DispatchRegistry, RegistryError};
