use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{FormRejection, PathRejection},
    },
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tagebuch_db::client::DbClient;
use thiserror::Error;
use tower::{
    Layer,
    util::{MapRequest, MapRequestLayer},
};
use tower_http::trace::TraceLayer;
use tracing::error;

mod form;
mod method_override;
mod routes;
mod sanitize;
mod views;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, FromRef)]
pub struct ServerState {
    pub db_client: Arc<DbClient>,
}

pub type App = MapRequest<Router, fn(Request) -> Request>;

/// The method override must run before routing so the rewritten verb decides
/// which route matches; it therefore wraps the finished router instead of
/// going through `Router::layer`.
pub fn app(state: ServerState) -> App {
    let router = routes::routes()
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    MapRequestLayer::new(method_override::rewrite as fn(Request) -> Request).layer(router)
}

async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Incoming form rejected: {0}")]
    FormRejection(#[from] FormRejection),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!(error = %self, "Replying with fallback response");

        match self {
            // A malformed id or body never surfaces as an error page.
            ServerError::PathRejection(_) | ServerError::FormRejection(_) => {
                Redirect::to("/posts").into_response()
            }
            ServerError::UnknownRoute(_) => {
                (StatusCode::NOT_FOUND, Html(views::not_found())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header::LOCATION},
    };
    use tower::ServiceExt;

    // The driver connects lazily, so routing behavior that never reaches the
    // database can be exercised without a running instance.
    async fn test_app() -> App {
        let db_client = Arc::new(
            DbClient::connect("mongodb://localhost:27017", "tagebuch-test")
                .await
                .unwrap(),
        );
        app(ServerState { db_client })
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        request(Method::GET, uri)
    }

    #[tokio::test]
    async fn root_redirects_to_the_listing() {
        let response = test_app().await.oneshot(get("/")).await.unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[LOCATION], "/posts");
    }

    #[tokio::test]
    async fn malformed_post_id_redirects_instead_of_erroring() {
        let response = test_app()
            .await
            .oneshot(get("/posts/not-a-valid-id"))
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[LOCATION], "/posts");
    }

    #[tokio::test]
    async fn malformed_id_on_the_edit_route_redirects_too() {
        let response = test_app()
            .await
            .oneshot(get("/posts/xyz/edit"))
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[LOCATION], "/posts");
    }

    #[tokio::test]
    async fn form_posts_with_method_override_reach_the_put_route() {
        let response = test_app()
            .await
            .oneshot(request(Method::POST, "/posts/not-a-valid-id?_method=PUT"))
            .await
            .unwrap();

        // The rewrite ran before routing: the PUT route matched and its id
        // rejection answered with the usual redirect, not a 405.
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[LOCATION], "/posts");
    }

    #[tokio::test]
    async fn unknown_routes_get_a_404_page() {
        let response = test_app().await.oneshot(get("/nope")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
