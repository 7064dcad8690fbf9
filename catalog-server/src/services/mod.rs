//! Supporting services

pub mod images;

pub use images::{ImageStore, image_url};
