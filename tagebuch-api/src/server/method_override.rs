use axum::{extract::Request, http::Method};

/// HTML forms can only submit GET and POST, so edit and delete forms tunnel
/// the real verb through a `_method` query parameter. This runs before
/// routing (it wraps the finished router rather than going through
/// `Router::layer`, which runs after the route has already matched). Only
/// POST requests are eligible.
pub fn rewrite(mut request: Request) -> Request {
    if request.method() == Method::POST
        && let Some(method) = override_from_query(request.uri().query())
    {
        *request.method_mut() = method;
    }

    request
}

fn override_from_query(query: Option<&str>) -> Option<Method> {
    let raw = query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("_method="))?;

    match raw.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
