//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account as persisted in the catalog document.
///
/// `password_hash` is stored alongside the account (argon2 PHC string); API
/// handlers never return this type directly, they convert to
/// [`crate::client::UserInfo`] first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub name: Option<String>,
    /// "admin" or "user"
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Partial user update payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    /// Only admins may change roles
    pub role: Option<String>,
}
