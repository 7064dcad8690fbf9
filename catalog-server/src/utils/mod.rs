//! Utility module - errors, logging, validation

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult, FieldErrors, set_expose_internal_detail};
pub use validation::{ValidationMode, validate_product};
