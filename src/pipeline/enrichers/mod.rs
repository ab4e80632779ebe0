//! # Enrichers
//!
//! One enricher per upstream concern, scheduled by the priority bands in
//! [`crate::constants::priority`]:
//!
//! | enricher    | priority | reads                    | writes              |
//! |-------------|----------|--------------------------|---------------------|
//! | editorial   | 100      | id                       | editorial           |
//! | section     | 90       | editorial                | section             |
//! | multimedia  | 80       | editorial                | multimedia, opening |
//! | tags        | 70       | editorial                | tags                |
//! | journalists | 60       | editorial                | journalists         |
//! | membership  | 50       | editorial, section       | membership links    |
//! | comments    | 40       | editorial                | comments count      |

pub mod comments;
pub mod editorial;
pub mod journalists;
pub mod membership;
pub mod multimedia;
pub mod section;
pub mod tags;

pub use comments::CommentsEnricher;
pub use editorial::EditorialEnricher;
pub use journalists::JournalistsEnricher;
pub use membership::MembershipEnricher;
pub use multimedia::MultimediaEnricher;
pub use section::SectionEnricher;
pub use tags::TagsEnricher;
