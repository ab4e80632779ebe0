use super::widget::Widget;
use crate::constants::media_types;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultimediaPhoto {
    pub id: String,
    /// Photo resource id in the photo upstream
    pub resource_id: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedVideo {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultimediaWidget {
    pub id: String,
    /// Widget id in the widget upstream
    pub resource_id: String,
}

/// Opening multimedia, tagged by media type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Multimedia {
    Photo(MultimediaPhoto),
    EmbedVideo(EmbedVideo),
    Widget(MultimediaWidget),
}

impl Multimedia {
    pub fn id(&self) -> &str {
        match self {
            Multimedia::Photo(photo) => &photo.id,
            Multimedia::EmbedVideo(video) => &video.id,
            Multimedia::Widget(widget) => &widget.id,
        }
    }

    /// Discriminant used by the multimedia orchestrator chain
    pub fn media_type(&self) -> &'static str {
        match self {
            Multimedia::Photo(_) => media_types::PHOTO,
            Multimedia::EmbedVideo(_) => media_types::EMBED_VIDEO,
            Multimedia::Widget(_) => media_types::WIDGET,
        }
    }
}

/// Photo resource from the photo upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Resolved resource backing an opening multimedia
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum OpeningResource {
    Photo(Photo),
    Video(EmbedVideo),
    Widget {
        widget: Widget,
        detail: serde_json::Value,
    },
}

/// Opening multimedia plus its resolved resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultimediaOpening {
    pub opening: Multimedia,
    #[serde(default)]
    pub resource: Option<OpeningResource>,
}
