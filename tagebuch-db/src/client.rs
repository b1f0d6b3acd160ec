use crate::record::{NewPostRecord, PostRecord};
use bson::doc;
use futures_util::stream::TryStreamExt;
use mongodb::{Client, Collection};
use tagebuch_common::model::{
    Id,
    post::{Post, PostContent, PostMarker},
};
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("Insert was acknowledged without an object id")]
    InsertedIdMissing,
}

pub struct DbClient {
    posts: Collection<PostRecord>,
}

impl DbClient {
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let posts = client.database(database).collection("posts");
        Ok(Self { posts })
    }

    /// All posts, in whatever order the database returns them.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let records: Vec<PostRecord> = self.posts.find(doc! {}).await?.try_collect().await?;
        Ok(records.into_iter().map(Post::from).collect())
    }

    pub async fn fetch_post(&self, id: Id<PostMarker>) -> Result<Option<Post>> {
        let record = self
            .posts
            .find_one(doc! { "_id": id.object_id() })
            .await?;
        Ok(record.map(Post::from))
    }

    pub async fn create_post(&self, content: &PostContent) -> Result<Id<PostMarker>> {
        let record = NewPostRecord {
            title: content.title.clone(),
            image: content.image.clone(),
            body: content.body.clone(),
            created: bson::DateTime::now(),
        };

        let inserted = self
            .posts
            .clone_with_type::<NewPostRecord>()
            .insert_one(&record)
            .await?;

        let object_id = inserted
            .inserted_id
            .as_object_id()
            .ok_or(DbError::InsertedIdMissing)?;
        Ok(object_id.into())
    }

    /// Replaces title/image/body on the matching post; `created` stays as it
    /// was. Updating a nonexistent id matches nothing and is not an error.
    pub async fn update_post(&self, id: Id<PostMarker>, content: &PostContent) -> Result<()> {
        self.posts
            .update_one(
                doc! { "_id": id.object_id() },
                doc! { "$set": {
                    "title": &content.title,
                    "image": &content.image,
                    "body": &content.body,
                } },
            )
            .await?;
        Ok(())
    }

    /// Deleting a nonexistent id removes nothing and is not an error.
    pub async fn delete_post(&self, id: Id<PostMarker>) -> Result<()> {
        self.posts.delete_one(doc! { "_id": id.object_id() }).await?;
        Ok(())
    }
}
