//! Static image serving

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/public/images/{filename}", get(handler::serve))
}
