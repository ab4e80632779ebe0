use super::WidgetTransformer;
use crate::constants::widget_types;
use crate::error::PipelineError;
use crate::models::Widget;
use crate::registry::Discriminant;
use serde_json::{json, Value};

const ASPECT_RATIO_PARAM: &str = "aspect-ratio";

/// Exposes the embed url and the numeric aspect ratio of an HTML widget
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlWidgetTransformer;

impl Discriminant for HtmlWidgetTransformer {
    fn discriminant(&self) -> &str {
        widget_types::HTML
    }
}

impl WidgetTransformer for HtmlWidgetTransformer {
    fn transform(&self, widget: &Widget) -> Result<Value, PipelineError> {
        let url = widget.url.as_deref().filter(|url| !url.is_empty());
        let aspect_ratio = widget.param(ASPECT_RATIO_PARAM).and_then(parse_aspect_ratio);

        Ok(json!({
            "url": url,
            "aspectRatio": aspect_ratio,
        }))
    }
}

/// `"16/9"` -> `1.8`, one decimal; anything malformed -> `None`
pub fn parse_aspect_ratio(raw: &str) -> Option<f64> {
    let (width, height) = raw.split_once('/')?;
    let width: f64 = width.trim().parse().ok()?;
    let height: f64 = height.trim().parse().ok()?;

    if height == 0.0 || !width.is_finite() || !height.is_finite() {
        return None;
    }
    Some((width / height * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn widget(url: Option<&str>, ratio: Option<&str>) -> Widget {
        let mut params = BTreeMap::new();
        if let Some(ratio) = ratio {
            params.insert(ASPECT_RATIO_PARAM.to_string(), ratio.to_string());
        }
        Widget {
            id: "w1".to_string(),
            widget_type: "html".to_string(),
            name: String::new(),
            url: url.map(str::to_string),
            params,
        }
    }

    #[test]
    fn test_aspect_ratio_parsing() {
        assert_eq!(parse_aspect_ratio("16/9"), Some(1.8));
        assert_eq!(parse_aspect_ratio(" 4 / 3 "), Some(1.3));
        assert_eq!(parse_aspect_ratio("1/1"), Some(1.0));
        assert_eq!(parse_aspect_ratio("16/0"), None);
        assert_eq!(parse_aspect_ratio("wide/9"), None);
        assert_eq!(parse_aspect_ratio("16:9"), None);
        assert_eq!(parse_aspect_ratio(""), None);
    }

    #[test]
    fn test_transform_full_widget() {
        let detail = HtmlWidgetTransformer
            .transform(&widget(Some("https://w.example/embed"), Some("16/9")))
            .unwrap();

        assert_eq!(
            detail,
            json!({ "url": "https://w.example/embed", "aspectRatio": 1.8 })
        );
    }

    #[test]
    fn test_empty_url_and_missing_ratio_become_null() {
        let detail = HtmlWidgetTransformer.transform(&widget(Some(""), None)).unwrap();
        assert_eq!(detail, json!({ "url": null, "aspectRatio": null }));
    }
}
