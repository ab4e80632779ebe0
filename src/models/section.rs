use serde::{Deserialize, Serialize};

/// Site section an editorial belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Encoded site name (used by the membership upstream)
    pub site: String,
}
