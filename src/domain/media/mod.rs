pub mod entity;
pub mod invariants;

pub use entity::{CastMember, CrossReferenceFacts, MediaKind, MediaTitle};
pub use invariants::validate_media_title;
