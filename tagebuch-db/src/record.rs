use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tagebuch_common::model::post::{Post, PostContent};

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub(crate) struct PostRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub image: String,
    pub body: String,
    pub created: bson::DateTime,
}

/// Insert-side shape: the `_id` is assigned by the database.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub(crate) struct NewPostRecord {
    pub title: String,
    pub image: String,
    pub body: String,
    pub created: bson::DateTime,
}

impl From<PostRecord> for Post {
    fn from(value: PostRecord) -> Self {
        Self {
            id: value.id.into(),
            content: PostContent {
                title: value.title,
                image: value.image,
                body: value.body,
            },
            created: value.created.to_time_0_3(),
        }
    }
}
