//! Cache provider implementations

pub mod moka;
pub mod noop;

pub use self::moka::MokaCacheService;
pub use noop::NoOpCacheService;
