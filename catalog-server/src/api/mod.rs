//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - registration, login, current principal
//! - [`products`] - product catalog CRUD and listing
//! - [`users`] - account management
//! - [`images`] - static serving of uploaded images
//!
//! [`build_app`] assembles the merged router with the shared middleware
//! stack; the auth middleware sits innermost and skips the public routes
//! itself.

pub mod auth;
pub mod health;
pub mod images;
pub mod products;
pub mod users;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Top-level response envelope used by the listing endpoint
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

/// Merge every resource router (no state, no middleware)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(auth::router())
        .merge(health::router())
        .merge(products::router())
        .merge(users::router())
        .merge(images::router())
}

/// Build the full application router with the middleware stack applied.
///
/// Layer order (outermost first at runtime): request id, trace, cors,
/// compression, body limit, auth. The body limit sits above the image
/// store's own 5MB check so oversized uploads reach the store and get the
/// field-keyed error instead of a bare 413.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    // multipart framing overhead on top of the raw image bytes
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    build_router()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
