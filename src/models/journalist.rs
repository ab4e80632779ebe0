use serde::{Deserialize, Serialize};

/// Journalist profile resolved from a signature alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journalist {
    pub alias_id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}
