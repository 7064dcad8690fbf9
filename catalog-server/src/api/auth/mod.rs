//! Authentication API module
//!
//! Login and registration are reachable both at the root (`/login`,
//! `/register`) and under `/api/auth/`.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/me", get(handler::me))
}
