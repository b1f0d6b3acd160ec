use crate::model::Id;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// A persisted blog post as read back from storage.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub content: PostContent,
    /// Set once at creation, never touched by updates.
    pub created: OffsetDateTime,
}

/// The client-editable fields of a post. `image` may be empty (no image);
/// `body` is expected to already be sanitized by the time it gets here.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostContent {
    pub title: String,
    pub image: String,
    pub body: String,
}
