use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Embeddable widget; `widget_type` selects the detail transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(default)]
    pub widget_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Free-form widget parameters as configured in the editor
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl Widget {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
