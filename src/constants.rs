//! # Engine Constants
//!
//! Priority bands, upstream component names and dispatch discriminants.

/// Enricher priority bands. Higher runs first.
pub mod priority {
    /// Core data; failing here aborts the pipeline
    pub const CORE: i32 = 100;
    pub const SECTION: i32 = 90;
    pub const MULTIMEDIA: i32 = 80;
    pub const TAGS: i32 = 70;
    pub const JOURNALISTS: i32 = 60;
    pub const MEMBERSHIP: i32 = 50;
    pub const COMMENTS: i32 = 40;

    /// Enrichers at or above this priority are critical
    pub const CRITICAL_THRESHOLD: i32 = CORE;
}

/// Upstream component names. Used as circuit breaker names, cache key
/// prefixes and configuration override keys.
pub mod components {
    pub const EDITORIAL: &str = "editorial";
    pub const SECTION: &str = "section";
    pub const MULTIMEDIA: &str = "multimedia";
    pub const PHOTO: &str = "photo";
    pub const WIDGET: &str = "widget";
    pub const TAGS: &str = "tags";
    pub const JOURNALISTS: &str = "journalists";
    pub const MEMBERSHIP: &str = "membership";
    pub const COMMENTS: &str = "comments";

    pub const ALL: &[&str] = &[
        EDITORIAL,
        SECTION,
        MULTIMEDIA,
        PHOTO,
        WIDGET,
        TAGS,
        JOURNALISTS,
        MEMBERSHIP,
        COMMENTS,
    ];
}

/// Editorial content types served by the orchestrator chain
pub mod content_types {
    pub const NEWS: &str = "news";
    pub const BLOG: &str = "blog";
    pub const OPINION: &str = "opinion";

    pub const ALL: &[&str] = &[NEWS, BLOG, OPINION];
}

/// Multimedia discriminants
pub mod media_types {
    pub const PHOTO: &str = "photo";
    pub const EMBED_VIDEO: &str = "embed_video";
    pub const WIDGET: &str = "widget";
}

/// Widget discriminants
pub mod widget_types {
    pub const HTML: &str = "html";
}

/// Environment variable names
pub mod env {
    pub const ENVIRONMENT: &str = "EDGE_ENV";
    pub const FALLBACK_ENVIRONMENT: &str = "APP_ENV";
    pub const CONFIG_DIR: &str = "EDGE_CONFIG_DIR";
    pub const CONFIG_PREFIX: &str = "EDGE";
}
