//! # Dispatch Registries
//!
//! One map from a discriminant string to exactly one handler. The same
//! contract serves every type-keyed choice in the engine:
//!
//! ```text
//! DispatchRegistry<dyn EditorialOrchestrator>   content type -> orchestrator
//! DispatchRegistry<dyn MultimediaOrchestrator>  media type   -> opening builder
//! DispatchRegistry<dyn WidgetTransformer>       widget type  -> detail transformer
//! ```
//!
//! Registries are assembled at startup. A second registration under an
//! existing key and a dispatch to an unknown key are both errors; neither is
//! ever ignored.

use crate::logging::log_registry_operation;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{registry}: a handler is already registered for '{key}'")]
    Duplicate { registry: String, key: String },

    #[error("{registry}: no handler for type '{key}'")]
    NotFound { registry: String, key: String },
}

/// A handler that knows which discriminant it serves
pub trait Discriminant {
    fn discriminant(&self) -> &str;
}

pub struct DispatchRegistry<H: ?Sized> {
    name: &'static str,
    handlers: HashMap<String, Arc<H>>,
}

impl<H: ?Sized> fmt::Debug for DispatchRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRegistry")
            .field("name", &self.name)
            .field("keys", &self.keys())
            .finish()
    }
}

impl<H: ?Sized> Clone for DispatchRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            handlers: self.handlers.clone(),
        }
    }
}

impl<H: ?Sized> DispatchRegistry<H> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: HashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<H>) -> Result<(), RegistryError> {
        let key = key.into();
        if self.handlers.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                registry: self.name.to_string(),
                key,
            });
        }

        log_registry_operation(self.name, "register", &key, "registered");
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// Builder form of [`Self::register`]
    pub fn with(mut self, key: impl Into<String>, handler: Arc<H>) -> Result<Self, RegistryError> {
        self.register(key, handler)?;
        Ok(self)
    }

    pub fn resolve(&self, key: &str) -> Result<&Arc<H>, RegistryError> {
        self.handlers.get(key).ok_or_else(|| RegistryError::NotFound {
            registry: self.name.to_string(),
            key: key.to_string(),
        })
    }

    /// Look up `key` and hand its handler to `f`, returning `f`'s output unchanged
    pub fn dispatch<'a, R>(
        &'a self,
        key: &str,
        f: impl FnOnce(&'a H) -> R,
    ) -> Result<R, RegistryError> {
        let handler = self.resolve(key)?;
        debug!(registry = self.name, key = key, "Dispatching");
        Ok(f(handler.as_ref()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl<H: ?Sized + Discriminant> DispatchRegistry<H> {
    /// Register under the handler's own discriminant
    pub fn register_handler(&mut self, handler: Arc<H>) -> Result<(), RegistryError> {
        let key = handler.discriminant().to_string();
        self.register(key, handler)
    }
}
