//! MediCare AI Server - disease prediction JSON API
//!
//! This library provides the HTTP layer of the MediCare AI backend: routing,
//! the request error envelope, CORS and request logging around the
//! [`diagnosis_engine`] and [`treatment_knowledge`] crates.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use crate::config::Settings;
pub use error::*;
pub use server::AppContext;

use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Largest request body the server buffers
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Create the main application router with all routes and middleware
pub fn create_app(ctx: AppContext) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(ctx)
}
