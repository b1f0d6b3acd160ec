use crate::server::{ServerError, ServerRouter, form::Form, sanitize, views};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use std::sync::Arc;
use tagebuch_common::model::{
    Id,
    post::{PostContent, PostMarker},
};
use tagebuch_db::client::DbClient;
use tracing::{debug, error};

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(root)
        .typed_get(list_posts)
        .typed_get(new_post_form)
        .typed_post(create_post)
        .typed_get(show_post)
        .typed_get(edit_post_form)
        .typed_put(update_post)
        .typed_delete(delete_post)
}

/// Create/update form bodies arrive with bracketed field names, nested under
/// a `post` object. Missing fields become empty strings; there is no
/// validation beyond body sanitization.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
struct PostForm {
    #[serde(rename = "post[title]", default)]
    title: String,
    #[serde(rename = "post[image]", default)]
    image: String,
    #[serde(rename = "post[body]", default)]
    body: String,
}

impl PostForm {
    fn into_content(self) -> PostContent {
        PostContent {
            title: self.title,
            image: self.image,
            body: sanitize::clean(&self.body),
        }
    }
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/", rejection(ServerError))]
struct RootPath();

async fn root(RootPath(): RootPath) -> Redirect {
    Redirect::to("/posts")
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts", rejection(ServerError))]
struct PostsPath();

async fn list_posts(PostsPath(): PostsPath, State(db): State<Arc<DbClient>>) -> Html<String> {
    let posts = match db.list_posts().await {
        Ok(posts) => posts,
        Err(err) => {
            error!(error = %err, "Listing posts failed, rendering an empty listing");
            Vec::new()
        }
    };

    Html(views::index(&posts))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/new", rejection(ServerError))]
struct NewPostPath();

async fn new_post_form(NewPostPath(): NewPostPath) -> Html<String> {
    Html(views::new_form())
}

async fn create_post(
    PostsPath(): PostsPath,
    State(db): State<Arc<DbClient>>,
    Form(form): Form<PostForm>,
) -> Response {
    let content = form.into_content();

    match db.create_post(&content).await {
        Ok(id) => {
            debug!(%id, "Created post");
            Redirect::to("/posts").into_response()
        }
        Err(err) => {
            error!(error = %err, "Creating post failed, re-rendering the form");
            Html(views::new_form()).into_response()
        }
    }
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
struct PostPath {
    id: Id<PostMarker>,
}

async fn show_post(PostPath { id }: PostPath, State(db): State<Arc<DbClient>>) -> Response {
    match db.fetch_post(id).await {
        Ok(Some(post)) => Html(views::show(&post)).into_response(),
        Ok(None) => Redirect::to("/posts").into_response(),
        Err(err) => {
            error!(error = %err, %id, "Fetching post failed");
            Redirect::to("/posts").into_response()
        }
    }
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/edit", rejection(ServerError))]
struct EditPostPath {
    id: Id<PostMarker>,
}

async fn edit_post_form(
    EditPostPath { id }: EditPostPath,
    State(db): State<Arc<DbClient>>,
) -> Response {
    match db.fetch_post(id).await {
        Ok(Some(post)) => Html(views::edit_form(&post)).into_response(),
        Ok(None) => Redirect::to("/posts").into_response(),
        Err(err) => {
            error!(error = %err, %id, "Fetching post for edit failed");
            Redirect::to("/posts").into_response()
        }
    }
}

async fn update_post(
    PostPath { id }: PostPath,
    State(db): State<Arc<DbClient>>,
    Form(form): Form<PostForm>,
) -> Redirect {
    let content = form.into_content();

    match db.update_post(id, &content).await {
        Ok(()) => Redirect::to(&format!("/posts/{id}")),
        Err(err) => {
            error!(error = %err, %id, "Updating post failed");
            Redirect::to("/posts")
        }
    }
}

async fn delete_post(PostPath { id }: PostPath, State(db): State<Arc<DbClient>>) -> Redirect {
    // Failure and success look the same to the client.
    if let Err(err) = db.delete_post(id).await {
        error!(error = %err, %id, "Deleting post failed");
    }

    Redirect::to("/posts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_decodes_bracketed_field_names() {
        let form: PostForm = serde_urlencoded::from_str(
            "post%5Btitle%5D=T&post%5Bimage%5D=I&post%5Bbody%5D=hello",
        )
        .unwrap();

        assert_eq!(form.title, "T");
        assert_eq!(form.image, "I");
        assert_eq!(form.body, "hello");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let form: PostForm = serde_urlencoded::from_str("post%5Btitle%5D=T").unwrap();

        assert_eq!(form.title, "T");
        assert_eq!(form.image, "");
        assert_eq!(form.body, "");
    }

    #[test]
    fn only_the_body_is_sanitized() {
        let form = PostForm {
            title: "<script>t</script>".into(),
            image: "<img>".into(),
            body: "<script>x</script>hello <b>there</b>".into(),
        };

        let content = form.into_content();
        assert_eq!(content.title, "<script>t</script>");
        assert_eq!(content.image, "<img>");
        assert_eq!(content.body, "hello <b>there</b>");
    }
}
