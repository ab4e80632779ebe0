//! # Gateway Cache Module
//!
//! Key/value store behind `CachedGateway`.
//!
//! ```text
//! CacheProvider (enum)            <- dispatch without a trait object at call sites
//!   ├── Moka(MokaCacheService)    <- in-process, per-entry TTL
//!   └── NoOp(NoOpCacheService)    <- always-miss fallback
//! ```
//!
//! Values are stored as JSON strings. Cache errors are logged by the
//! decorator and never propagated to callers.

pub mod errors;
pub mod provider;
pub mod providers;
pub mod traits;

pub use errors::{CacheError, CacheResult};
pub use provider::CacheProvider;
pub use providers::{MokaCacheService, NoOpCacheService};
pub use traits::CacheService;
