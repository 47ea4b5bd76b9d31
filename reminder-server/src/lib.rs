//! HTTP facade over the reminder engine.
//!
//! Routes:
//! - `GET /` service descriptor
//! - `GET /api/reminder` reading from query parameters
//! - `POST /api/reminder` reading from a JSON body
//! - `GET /health`
//!
//! Anything else answers 404 with the list of endpoints.

use axum::{Router, routing::get};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod params;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;

pub fn create_router() -> Router {
    Router::new()
        .route("/", get(routes::index).fallback(routes::not_found))
        .route("/health", get(routes::health).fallback(routes::not_found))
        .route(
            "/api/reminder",
            get(routes::reminder_from_query)
                .post(routes::reminder_from_body)
                .fallback(routes::not_found),
        )
        .fallback(routes::not_found)
        // Middleware (applied in reverse order)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
