//! Authentication middleware
//!
//! Enforces the per-resource permission bits: product and image reads are
//! public, every product write and every `/users` route requires a valid
//! bearer token.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;

/// Paths that never require authentication, regardless of method
fn is_public_route(path: &str) -> bool {
    path == "/login"
        || path == "/register"
        || path == "/api/auth/login"
        || path == "/api/auth/register"
        || path == "/api/health"
}

/// Read-only prefixes that are public for GET/HEAD (products rule 664)
fn is_public_read(path: &str) -> bool {
    path == "/products"
        || path.starts_with("/products/")
        || path == "/api/products"
        || path.starts_with("/api/products/")
        || path.starts_with("/public/images/")
}

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// then injects [`CurrentUser`] into request extensions.
///
/// | Failure | Status |
/// |---------|--------|
/// | no Authorization header | 401 Unauthorized |
/// | expired token | 401 Token expired |
/// | malformed/invalid token | 401 Invalid token |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    let method = req.method();

    // CORS preflight passes through
    if method == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if is_public_route(path) {
        return Ok(next.run(req).await);
    }

    if (method == http::Method::GET || method == http::Method::HEAD) && is_public_read(path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(uri = %req.uri(), "Request without credentials rejected");
            return Err(AppError::Unauthorized);
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        assert!(is_public_route("/login"));
        assert!(is_public_route("/register"));
        assert!(is_public_route("/api/health"));
        assert!(!is_public_route("/users"));
    }

    #[test]
    fn public_reads() {
        assert!(is_public_read("/products"));
        assert!(is_public_read("/api/products/123"));
        assert!(is_public_read("/public/images/1700000000000.png"));
        assert!(!is_public_read("/users"));
        assert!(!is_public_read("/api/users/1"));
    }
}
