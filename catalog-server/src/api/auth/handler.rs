//! Authentication handlers
//!
//! Registration, login and the current-principal endpoint.

use std::time::Duration;

use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use shared::client::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use shared::models::User;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, FieldErrors};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

const MIN_PASSWORD_LEN: usize = 6;

fn validate_registration(req: &RegisterRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let email = req.email.trim();
    if email.is_empty() {
        errors.insert("email".to_string(), "Email is required".to_string());
    } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        errors.insert("email".to_string(), "Invalid email".to_string());
    }

    if req.password.is_empty() {
        errors.insert("password".to_string(), "Password is required".to_string());
    } else if req.password.len() < MIN_PASSWORD_LEN {
        errors.insert(
            "password".to_string(),
            "Password must be at least 6 characters".to_string(),
        );
    }

    errors
}

/// POST /register - create an account and return a token
///
/// The first account ever registered becomes the admin; everyone after
/// that is a regular user. Duplicate emails are a 409.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let errors = validate_registration(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let email = req.email.trim().to_lowercase();
    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let _guard = state.store.lock_for_write().await;
    let mut doc = state.store.load();

    if doc.users.iter().any(|u| u.email == email) {
        return Err(AppError::conflict("Email already registered"));
    }

    let role = if doc.users.is_empty() { "admin" } else { "user" };
    let user = User {
        id: state.store.next_id(&doc),
        email,
        password_hash,
        name: req.name.clone(),
        role: role.to_string(),
        created_at: Utc::now(),
    };
    doc.users.push(user.clone());

    state
        .store
        .save(&doc)
        .map_err(|e| AppError::internal(e.to_string()))?;

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, email = %user.email, role = %user.role, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserInfo::from(&user),
        }),
    ))
}

/// POST /login - authenticate and return a token
///
/// The error message never distinguishes "no such account" from "wrong
/// password", and the fixed delay keeps the timing identical too.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = req.email.trim().to_lowercase();

    let doc = state.store.load();
    let account = doc.users.iter().find(|u| u.email == email).cloned();

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match account {
        Some(user) => {
            let password_valid = verify_password(&user.password_hash, &req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            user
        }
        None => {
            tracing::warn!(email = %email, "Login failed - unknown account");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, email = %user.email, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&user),
    }))
}

/// GET /api/auth/me - the account behind the presented token
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let doc = state.store.load();
    let user = doc
        .users
        .iter()
        .find(|u| u.id == current.id)
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserInfo::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: None,
        }
    }

    #[test]
    fn registration_field_errors_collect() {
        let errors = validate_registration(&request("", ""));
        assert_eq!(errors.get("email").unwrap(), "Email is required");
        assert_eq!(errors.get("password").unwrap(), "Password is required");
    }

    #[test]
    fn malformed_email_and_short_password() {
        let errors = validate_registration(&request("not-an-email", "abc"));
        assert_eq!(errors.get("email").unwrap(), "Invalid email");
        assert_eq!(
            errors.get("password").unwrap(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_registration(&request("farmer@example.com", "hunter22")).is_empty());
    }
}
