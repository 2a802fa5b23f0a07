use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};

/// Preflight responses may be cached by the browser for this long
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];
const ALLOWED_HEADERS: [HeaderName; 3] =
    [header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION];

/// Request timing middleware
pub async fn request_timing_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let elapsed = start.elapsed();

    tracing::info!(
        method = %method,
        path = %path,
        duration_ms = elapsed.as_millis(),
        status = response.status().as_u16(),
        "Request processed"
    );

    response
}

/// CORS for the browser frontend, which is served from another origin.
///
/// The layer answers every `OPTIONS` request itself, so it must not wrap a
/// route whose `OPTIONS` handler has a body of its own.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .max_age(CORS_MAX_AGE)
}

/// The headers [`create_cors_layer`] sends on a preflight, for handlers that
/// answer `OPTIONS` themselves.
pub fn preflight_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            join_header(ALLOWED_METHODS.iter().map(Method::as_str)),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            join_header(ALLOWED_HEADERS.iter().map(HeaderName::as_str)),
        ),
        (header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(CORS_MAX_AGE.as_secs())),
    ]
}

fn join_header<'a>(values: impl Iterator<Item = &'a str>) -> HeaderValue {
    let joined = values.collect::<Vec<_>>().join(",");
    // method and header names are visible ASCII
    HeaderValue::from_str(&joined).unwrap_or_else(|_| HeaderValue::from_static("*"))
}
