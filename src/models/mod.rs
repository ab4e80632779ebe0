pub mod editorial;
pub mod journalist;
pub mod membership;
pub mod multimedia;
pub mod section;
pub mod tag;
pub mod widget;

// Re-export domain models for easy access
pub use editorial::{
    Editorial, EditorialId, MembershipButton, MembershipCard, PublicationStatus, Signature,
};
pub use journalist::Journalist;
pub use membership::{CommentCount, MembershipQuery};
pub use multimedia::{
    EmbedVideo, Multimedia, MultimediaOpening, MultimediaPhoto, MultimediaWidget, OpeningResource,
    Photo,
};
pub use section::Section;
pub use tag::Tag;
pub use widget::Widget;
