//! Product API module
//!
//! The catalog is served under two equivalent bases, `/products` and
//! `/api/products`; both point at the same handlers.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    routes_at("/products").merge(routes_at("/api/products"))
}

fn routes_at(base: &str) -> Router<ServerState> {
    Router::new()
        .route(base, get(handler::list).post(handler::create))
        .route(
            &format!("{base}/{{id}}"),
            get(handler::get_by_id)
                .put(handler::update)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
