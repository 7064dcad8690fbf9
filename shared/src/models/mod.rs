//! Data models persisted in the catalog document

pub mod product;
pub mod user;

pub use product::{Product, ProductDraft, ProductView};
pub use user::{User, UserUpdate};
