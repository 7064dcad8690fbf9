//! User management handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::client::UserInfo;
use shared::models::UserUpdate;

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /users - list every account (admin only)
pub async fn list(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserInfo>>> {
    if !current.is_admin() {
        return Err(AppError::forbidden("Administrator access required"));
    }

    let doc = state.store.load();
    Ok(Json(doc.users.iter().map(UserInfo::from).collect()))
}

/// GET /users/:id - fetch an account (owner or admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserInfo>> {
    if !current.can_access_user(id) {
        return Err(AppError::forbidden("Access denied"));
    }

    let doc = state.store.load();
    let user = doc
        .users
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserInfo::from(user)))
}

/// PUT|PATCH /users/:id - partial account update (owner or admin)
///
/// A submitted password is re-hashed before it is stored; a role change is
/// accepted only from an admin.
pub async fn update(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserInfo>> {
    if !current.can_access_user(id) {
        return Err(AppError::forbidden("Access denied"));
    }
    if payload.role.is_some() && !current.is_admin() {
        return Err(AppError::forbidden("Only administrators may change roles"));
    }
    if let Some(password) = &payload.password
        && password.len() < 6
    {
        return Err(AppError::validation(
            "password",
            "Password must be at least 6 characters",
        ));
    }

    let password_hash = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let _guard = state.store.lock_for_write().await;
    let mut doc = state.store.load();

    if let Some(email) = &payload.email {
        let email = email.trim().to_lowercase();
        if doc.users.iter().any(|u| u.email == email && u.id != id) {
            return Err(AppError::conflict("Email already registered"));
        }
    }

    let Some(user) = doc.users.iter_mut().find(|u| u.id == id) else {
        return Err(AppError::not_found("User not found"));
    };

    if let Some(email) = payload.email {
        user.email = email.trim().to_lowercase();
    }
    if let Some(hash) = password_hash {
        user.password_hash = hash;
    }
    if let Some(name) = payload.name {
        user.name = Some(name);
    }
    if let Some(role) = payload.role {
        user.role = role;
    }
    let updated = user.clone();

    state
        .store
        .save(&doc)
        .map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!(user_id = id, by = %current.email, "User updated");
    Ok(Json(UserInfo::from(&updated)))
}

/// DELETE /users/:id - remove an account (owner or admin)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !current.can_access_user(id) {
        return Err(AppError::forbidden("Access denied"));
    }

    let _guard = state.store.lock_for_write().await;
    let mut doc = state.store.load();

    let Some(pos) = doc.users.iter().position(|u| u.id == id) else {
        return Err(AppError::not_found("User not found"));
    };
    doc.users.remove(pos);

    state
        .store
        .save(&doc)
        .map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!(user_id = id, by = %current.email, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
