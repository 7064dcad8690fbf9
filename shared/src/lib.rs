//! Shared types for the Harvest catalog platform
//!
//! Common types used by the catalog server and its clients: data models,
//! auth request/response DTOs and the list-query / pagination types.

pub mod client;
pub mod models;
pub mod query;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
pub use models::{Product, ProductDraft, ProductView, User};
pub use query::{ListParams, Pagination, ProductPage};
