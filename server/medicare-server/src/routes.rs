use axum::{
    routing::{get, post, MethodRouter},
    Router,
};

use crate::{
    handlers::{health, home, models, predict},
    middleware, openapi,
    server::AppContext,
};

/// Landing page, health check and model listing
pub fn info_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health_check))
        .route("/models", get(models::list_models))
}

/// Prediction routes.
///
/// CORS wraps only `POST`; `OPTIONS` is registered after the layer so the
/// preflight handler answers with its own body and CORS headers.
pub fn prediction_routes() -> Router<AppContext> {
    let submit: MethodRouter<AppContext> =
        post(predict::predict).layer(middleware::create_cors_layer());

    Router::new().route("/predict", submit.options(predict::preflight))
}

/// Create all routes
pub fn create_routes() -> Router<AppContext> {
    Router::new()
        .merge(info_routes())
        .merge(openapi::create_docs_routes())
        .layer(middleware::create_cors_layer())
        .merge(prediction_routes())
}
