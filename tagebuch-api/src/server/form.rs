use crate::server::ServerError;
use axum::extract::FromRequest;

#[derive(FromRequest, Debug, Clone, Copy, Default)]
#[from_request(via(axum::extract::Form), rejection(ServerError))]
pub struct Form<T>(pub T);
