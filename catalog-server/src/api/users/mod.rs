//! User management API module
//!
//! Every route here requires a bearer token; listing is admin-only, the
//! per-account routes allow the owner or an admin. Mounted under both
//! `/users` and `/api/users`.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    routes_at("/users").merge(routes_at("/api/users"))
}

fn routes_at(base: &str) -> Router<ServerState> {
    Router::new()
        .route(base, get(handler::list))
        .route(
            &format!("{base}/{{id}}"),
            get(handler::get_by_id)
                .put(handler::update)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
