//! Opening multimedia builders, one per media type

use crate::constants::media_types;
use crate::error::PipelineError;
use crate::gateway::{PhotoGateway, WidgetGateway};
use crate::models::{Multimedia, MultimediaOpening, OpeningResource};
use crate::registry::{Discriminant, DispatchRegistry, RegistryError};
use crate::transformer::{transform_widget, WidgetTransformerRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, warn};

/// Builds the opening for one media type
///
/// `Ok(None)` means the backing resource could not be resolved; the opening
/// is then left out rather than failing the request.
#[async_trait]
pub trait MultimediaOrchestrator: Discriminant + Send + Sync {
    async fn build_opening(
        &self,
        multimedia: &Multimedia,
    ) -> Result<Option<MultimediaOpening>, PipelineError>;
}

pub type MultimediaOrchestratorChain = DispatchRegistry<dyn MultimediaOrchestrator>;

fn wrong_media(expected: &str, multimedia: &Multimedia) -> PipelineError {
    PipelineError::internal(format!(
        "{expected} orchestrator received {} multimedia",
        multimedia.media_type()
    ))
    .with_context("multimedia_id", multimedia.id())
}

pub struct PhotoOrchestrator {
    photos: Arc<PhotoGateway>,
}

impl PhotoOrchestrator {
    pub fn new(photos: Arc<PhotoGateway>) -> Self {
        Self { photos }
    }
}

impl Discriminant for PhotoOrchestrator {
    fn discriminant(&self) -> &str {
        media_types::PHOTO
    }
}

#[async_trait]
impl MultimediaOrchestrator for PhotoOrchestrator {
    async fn build_opening(
        &self,
        multimedia: &Multimedia,
    ) -> Result<Option<MultimediaOpening>, PipelineError> {
        let Multimedia::Photo(photo) = multimedia else {
            return Err(wrong_media(media_types::PHOTO, multimedia));
        };

        match self.photos.find_by_id_async(&photo.resource_id).await {
            Ok(Some(resource)) => Ok(Some(MultimediaOpening {
                opening: multimedia.clone(),
                resource: Some(OpeningResource::Photo(resource)),
            })),
            Ok(None) => {
                warn!(photo_id = %photo.resource_id, "Opening photo not found");
                Ok(None)
            }
            Err(e) => {
                error!(photo_id = %photo.resource_id, error = %e, "Failed to retrieve opening photo");
                Ok(None)
            }
        }
    }
}

/// Embedded videos carry everything they need; no lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedVideoOrchestrator;

impl Discriminant for EmbedVideoOrchestrator {
    fn discriminant(&self) -> &str {
        media_types::EMBED_VIDEO
    }
}

#[async_trait]
impl MultimediaOrchestrator for EmbedVideoOrchestrator {
    async fn build_opening(
        &self,
        multimedia: &Multimedia,
    ) -> Result<Option<MultimediaOpening>, PipelineError> {
        match multimedia {
            Multimedia::EmbedVideo(video) => Ok(Some(MultimediaOpening {
                opening: multimedia.clone(),
                resource: Some(OpeningResource::Video(video.clone())),
            })),
            other => Err(wrong_media(media_types::EMBED_VIDEO, other)),
        }
    }
}

pub struct WidgetOrchestrator {
    widgets: Arc<WidgetGateway>,
    transformers: Arc<WidgetTransformerRegistry>,
}

impl WidgetOrchestrator {
    pub fn new(widgets: Arc<WidgetGateway>, transformers: Arc<WidgetTransformerRegistry>) -> Self {
        Self {
            widgets,
            transformers,
        }
    }
}

impl Discriminant for WidgetOrchestrator {
    fn discriminant(&self) -> &str {
        media_types::WIDGET
    }
}

#[async_trait]
impl MultimediaOrchestrator for WidgetOrchestrator {
    async fn build_opening(
        &self,
        multimedia: &Multimedia,
    ) -> Result<Option<MultimediaOpening>, PipelineError> {
        let Multimedia::Widget(reference) = multimedia else {
            return Err(wrong_media(media_types::WIDGET, multimedia));
        };

        let widget = match self.widgets.find_by_id_async(&reference.resource_id).await {
            Ok(Some(widget)) => widget,
            Ok(None) => {
                warn!(widget_id = %reference.resource_id, "Opening widget not found");
                return Ok(None);
            }
            Err(e) => {
                error!(widget_id = %reference.resource_id, error = %e, "Failed to retrieve opening widget");
                return Ok(None);
            }
        };

        // An unregistered widget type is a wiring mistake, not an upstream hiccup
        let detail = transform_widget(&self.transformers, &widget)?;

        Ok(Some(MultimediaOpening {
            opening: multimedia.clone(),
            resource: Some(OpeningResource::Widget { widget, detail }),
        }))
    }
}

/// Chain with the photo, embed-video and widget builders
pub fn multimedia_chain(
    photos: Arc<PhotoGateway>,
    widgets: Arc<WidgetGateway>,
    transformers: Arc<WidgetTransformerRegistry>,
) -> Result<MultimediaOrchestratorChain, RegistryError> {
    let mut chain: MultimediaOrchestratorChain = DispatchRegistry::new("multimedia_orchestrators");
    chain.register_handler(Arc::new(PhotoOrchestrator::new(photos)))?;
    chain.register_handler(Arc::new(EmbedVideoOrchestrator))?;
    chain.register_handler(Arc::new(WidgetOrchestrator::new(widgets, transformers)))?;
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::gateway::{GatewayError, InMemoryGateway};
    use crate::models::{EmbedVideo, MultimediaPhoto, MultimediaWidget, Photo, Widget};
    use crate::transformer::default_transformers;
    use std::collections::BTreeMap;

    fn photo_gateway() -> Arc<InMemoryGateway<str, Photo>> {
        Arc::new(InMemoryGateway::new("photo").with_record(
            "p-1",
            Photo {
                id: "p-1".to_string(),
                url: "https://img.example/p-1.jpg".to_string(),
                width: 1200,
                height: 800,
            },
        ))
    }

    fn widget_gateway(widget_type: &str) -> Arc<InMemoryGateway<str, Widget>> {
        Arc::new(InMemoryGateway::new("widget").with_record(
            "w-1",
            Widget {
                id: "w-1".to_string(),
                widget_type: widget_type.to_string(),
                name: "Results".to_string(),
                url: Some("https://w.example/results".to_string()),
                params: BTreeMap::from([("aspect-ratio".to_string(), "4/3".to_string())]),
            },
        ))
    }

    fn chain(widget_type: &str) -> (MultimediaOrchestratorChain, Arc<InMemoryGateway<str, Photo>>) {
        let photos = photo_gateway();
        let chain = multimedia_chain(
            photos.clone(),
            widget_gateway(widget_type),
            Arc::new(default_transformers().unwrap()),
        )
        .unwrap();
        (chain, photos)
    }

    async fn build(
        chain: &MultimediaOrchestratorChain,
        multimedia: &Multimedia,
    ) -> Result<Option<MultimediaOpening>, PipelineError> {
        chain
            .resolve(multimedia.media_type())?
            .build_opening(multimedia)
            .await
    }

    fn photo(resource_id: &str) -> Multimedia {
        Multimedia::Photo(MultimediaPhoto {
            id: "m-1".to_string(),
            resource_id: resource_id.to_string(),
            caption: String::new(),
        })
    }

    #[tokio::test]
    async fn test_photo_opening_resolves_resource() {
        let (chain, _) = chain("html");
        let opening = build(&chain, &photo("p-1")).await.unwrap().unwrap();

        assert!(matches!(opening.resource, Some(OpeningResource::Photo(ref p)) if p.width == 1200));
        assert_eq!(opening.opening.id(), "m-1");
    }

    #[tokio::test]
    async fn test_photo_failure_leaves_no_opening() {
        let (chain, photos) = chain("html");
        assert!(build(&chain, &photo("missing")).await.unwrap().is_none());

        photos.fail_with(GatewayError::transport("photo", "reset by peer"));
        assert!(build(&chain, &photo("p-1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_embed_video_needs_no_lookup() {
        let (chain, photos) = chain("html");
        let video = Multimedia::EmbedVideo(EmbedVideo {
            id: "v-1".to_string(),
            url: "https://video.example/v-1".to_string(),
            provider: "example".to_string(),
        });

        let opening = build(&chain, &video).await.unwrap().unwrap();
        assert!(matches!(opening.resource, Some(OpeningResource::Video(_))));
        assert_eq!(photos.call_count(), 0);
    }

    #[tokio::test]
    async fn test_widget_opening_carries_transformed_detail() {
        let (chain, _) = chain("html");
        let widget = Multimedia::Widget(MultimediaWidget {
            id: "m-2".to_string(),
            resource_id: "w-1".to_string(),
        });

        let opening = build(&chain, &widget).await.unwrap().unwrap();
        match opening.resource {
            Some(OpeningResource::Widget { detail, .. }) => {
                assert_eq!(detail["aspectRatio"], 1.3);
                assert_eq!(detail["url"], "https://w.example/results");
            }
            other => panic!("unexpected resource: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unregistered_widget_type_fails() {
        let (chain, _) = chain("poll");
        let widget = Multimedia::Widget(MultimediaWidget {
            id: "m-2".to_string(),
            resource_id: "w-1".to_string(),
        });

        let err = build(&chain, &widget).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigurationError);
    }

    #[tokio::test]
    async fn test_orchestrator_rejects_other_media() {
        let err = EmbedVideoOrchestrator
            .build_opening(&photo("p-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
