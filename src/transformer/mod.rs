//! # Widget Detail Transformers
//!
//! Turn a fetched [`Widget`] into the detail payload exposed with the opening
//! multimedia. One transformer per widget type, looked up through a
//! [`WidgetTransformerRegistry`].

pub mod html;

pub use html::HtmlWidgetTransformer;

use crate::error::PipelineError;
use crate::models::Widget;
use crate::registry::{Discriminant, DispatchRegistry, RegistryError};
use serde_json::Value;
use std::sync::Arc;

pub trait WidgetTransformer: Discriminant + Send + Sync {
    fn transform(&self, widget: &Widget) -> Result<Value, PipelineError>;
}

pub type WidgetTransformerRegistry = DispatchRegistry<dyn WidgetTransformer>;

/// Registry with every built-in transformer
pub fn default_transformers() -> Result<WidgetTransformerRegistry, RegistryError> {
    let mut registry: WidgetTransformerRegistry = DispatchRegistry::new("widget_transformers");
    registry.register_handler(Arc::new(HtmlWidgetTransformer))?;
    Ok(registry)
}

/// Transform `widget` with the transformer registered for its type
pub fn transform_widget(
    registry: &WidgetTransformerRegistry,
    widget: &Widget,
) -> Result<Value, PipelineError> {
    registry.dispatch(&widget.widget_type, |transformer| transformer.transform(widget))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::BTreeMap;

    fn widget(widget_type: &str) -> Widget {
        Widget {
            id: "w1".to_string(),
            widget_type: widget_type.to_string(),
            name: "Live results".to_string(),
            url: Some("https://widgets.example/live".to_string()),
            params: BTreeMap::new(),
        }
    }

    #[test]
    fn test_default_registry_serves_html() {
        let registry = default_transformers().unwrap();
        assert_eq!(registry.keys(), vec!["html"]);

        let detail = transform_widget(&registry, &widget("html")).unwrap();
        assert_eq!(detail["url"], "https://widgets.example/live");
    }

    #[test]
    fn test_unknown_widget_type_is_a_configuration_error() {
        let registry = default_transformers().unwrap();
        let err = transform_widget(&registry, &widget("poll")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigurationError);
    }

    #[test]
    fn test_second_html_transformer_is_rejected() {
        let mut registry = default_transformers().unwrap();
        assert!(registry.register_handler(Arc::new(HtmlWidgetTransformer)).is_err());
    }
}
