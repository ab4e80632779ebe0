//! Test data builders and in-memory upstream fixtures

#![allow(dead_code)] // Not every test binary uses every builder

use editorial_core::bootstrap::Upstreams;
use editorial_core::error::PipelineError;
use editorial_core::gateway::InMemoryGateway;
use editorial_core::models::{
    CommentCount, Editorial, EmbedVideo, Journalist, MembershipButton, MembershipCard,
    MembershipQuery, Multimedia, MultimediaPhoto, MultimediaWidget, Photo, PublicationStatus,
    Section, Signature, Tag, Widget,
};
use editorial_core::pipeline::PipelineObserver;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builder pattern for creating test Editorials
pub struct EditorialBuilder {
    editorial: Editorial,
}

impl EditorialBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            editorial: Editorial {
                id: id.to_string(),
                editorial_type: "news".to_string(),
                title: format!("Editorial {id}"),
                section_id: "economy".to_string(),
                multimedia_id: None,
                tag_ids: Vec::new(),
                signatures: Vec::new(),
                membership_cards: Vec::new(),
                status: PublicationStatus::Published,
                published_at: None,
                deleted: false,
                commentable: true,
                indexable: true,
            },
        }
    }

    pub fn with_status(mut self, status: PublicationStatus) -> Self {
        self.editorial.status = status;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.editorial.deleted = true;
        self
    }

    pub fn with_multimedia(mut self, multimedia_id: &str) -> Self {
        self.editorial.multimedia_id = Some(multimedia_id.to_string());
        self
    }

    pub fn with_tags(mut self, tag_ids: &[&str]) -> Self {
        self.editorial.tag_ids = tag_ids.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_signatures(mut self, aliases: &[&str]) -> Self {
        self.editorial.signatures = aliases
            .iter()
            .map(|alias| Signature {
                alias_id: alias.to_string(),
                display_name: None,
            })
            .collect();
        self
    }

    pub fn with_membership_button(mut self, url: &str, url_membership: &str) -> Self {
        self.editorial.membership_cards.push(MembershipCard {
            buttons: vec![MembershipButton {
                url: url.to_string(),
                url_membership: url_membership.to_string(),
            }],
        });
        self
    }

    pub fn build(self) -> Editorial {
        self.editorial
    }
}

pub fn section(id: &str) -> Section {
    Section {
        id: id.to_string(),
        name: "Economy".to_string(),
        url: format!("/{id}"),
        site: "main-site".to_string(),
    }
}

pub fn tag(id: &str) -> Tag {
    Tag {
        id: id.to_string(),
        name: id.to_uppercase(),
        url: format!("/tags/{id}"),
    }
}

pub fn journalist(alias: &str) -> Journalist {
    Journalist {
        alias_id: alias.to_string(),
        name: format!("Journalist {alias}"),
        url: Some(format!("/authors/{alias}")),
        photo_url: None,
    }
}

pub fn photo_multimedia(id: &str, resource_id: &str) -> Multimedia {
    Multimedia::Photo(MultimediaPhoto {
        id: id.to_string(),
        resource_id: resource_id.to_string(),
        caption: "Parliament at dusk".to_string(),
    })
}

pub fn video_multimedia(id: &str) -> Multimedia {
    Multimedia::EmbedVideo(EmbedVideo {
        id: id.to_string(),
        url: format!("https://video.example/{id}"),
        provider: "example".to_string(),
    })
}

pub fn widget_multimedia(id: &str, resource_id: &str) -> Multimedia {
    Multimedia::Widget(MultimediaWidget {
        id: id.to_string(),
        resource_id: resource_id.to_string(),
    })
}

pub fn photo(id: &str) -> Photo {
    Photo {
        id: id.to_string(),
        url: format!("https://img.example/{id}.jpg"),
        width: 1600,
        height: 900,
    }
}

pub fn html_widget(id: &str, aspect_ratio: &str) -> Widget {
    Widget {
        id: id.to_string(),
        widget_type: "html".to_string(),
        name: "Election map".to_string(),
        url: Some(format!("https://widgets.example/{id}")),
        params: BTreeMap::from([("aspect-ratio".to_string(), aspect_ratio.to_string())]),
    }
}

/// One in-memory gateway per upstream, with handles kept for assertions
pub struct Fixtures {
    pub editorial: Arc<InMemoryGateway<str, Editorial>>,
    pub section: Arc<InMemoryGateway<str, Section>>,
    pub multimedia: Arc<InMemoryGateway<str, Multimedia>>,
    pub photo: Arc<InMemoryGateway<str, Photo>>,
    pub widget: Arc<InMemoryGateway<str, Widget>>,
    pub tags: Arc<InMemoryGateway<str, Tag>>,
    pub journalists: Arc<InMemoryGateway<str, Journalist>>,
    pub membership: Arc<InMemoryGateway<MembershipQuery, Vec<String>>>,
    pub comments: Arc<InMemoryGateway<str, CommentCount>>,
}

impl Fixtures {
    pub fn empty() -> Self {
        Self {
            editorial: Arc::new(InMemoryGateway::new("editorial")),
            section: Arc::new(InMemoryGateway::new("section")),
            multimedia: Arc::new(InMemoryGateway::new("multimedia")),
            photo: Arc::new(InMemoryGateway::new("photo")),
            widget: Arc::new(InMemoryGateway::new("widget")),
            tags: Arc::new(InMemoryGateway::new("tags")),
            journalists: Arc::new(InMemoryGateway::new("journalists")),
            membership: Arc::new(InMemoryGateway::new("membership")),
            comments: Arc::new(InMemoryGateway::new("comments")),
        }
    }

    /// Editorial 4433 with every concern populated upstream
    pub fn complete() -> Self {
        let fixtures = Self::empty();
        let editorial = EditorialBuilder::new("4433")
            .with_multimedia("m-1")
            .with_tags(&["budget", "missing", "tax"])
            .with_signatures(&["ana", "luis"])
            .with_membership_button("https://site.example/plain", "https://site.example/member")
            .build();

        let query = MembershipQuery {
            editorial_id: "4433".to_string(),
            links: editorial.membership_links(),
            site_name: "main-site".to_string(),
        };

        fixtures.editorial.insert("4433", editorial);
        fixtures.section.insert("economy", section("economy"));
        fixtures.multimedia.insert("m-1", photo_multimedia("m-1", "p-1"));
        fixtures.photo.insert("p-1", photo("p-1"));
        fixtures.tags.insert("budget", tag("budget"));
        fixtures.tags.insert("tax", tag("tax"));
        fixtures.journalists.insert("ana", journalist("ana"));
        fixtures.journalists.insert("luis", journalist("luis"));
        fixtures.membership.insert(
            &query,
            vec![
                "https://subscribe.example/member?site=main".to_string(),
                "https://subscribe.example/plain?site=main".to_string(),
            ],
        );
        fixtures
            .comments
            .insert("4433", CommentCount { total_records: 17 });
        fixtures
    }

    pub fn upstreams(&self) -> Upstreams {
        Upstreams {
            editorial: self.editorial.clone(),
            section: self.section.clone(),
            multimedia: self.multimedia.clone(),
            photo: self.photo.clone(),
            widget: self.widget.clone(),
            tags: self.tags.clone(),
            journalists: self.journalists.clone(),
            membership: self.membership.clone(),
            comments: self.comments.clone(),
        }
    }
}

/// Observer that keeps every event as `kind:enricher`
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn executed(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| !e.starts_with("skip:"))
            .collect()
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_skip(&self, enricher: &str, _context_id: &str) {
        self.events.lock().push(format!("skip:{enricher}"));
    }

    fn on_success(&self, enricher: &str, _context_id: &str) {
        self.events.lock().push(format!("ok:{enricher}"));
    }

    fn on_failure(&self, enricher: &str, _context_id: &str, _error: &PipelineError) {
        self.events.lock().push(format!("fail:{enricher}"));
    }
}
