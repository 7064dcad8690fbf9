//! Harvest Catalog Server
//!
//! # Architecture overview
//!
//! A small HTTP server around a JSON-file-backed product catalog:
//!
//! - **Store** (`store`): loads/saves the whole catalog document, one file
//! - **Query Engine** (`query`): filter → search → sort → paginate pipeline
//! - **Image store** (`services/images`): uploaded product images on disk
//! - **Auth** (`auth`): JWT + argon2 authentication
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module structure
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # Config, state, server
//! ├── auth/          # JWT auth, passwords, middleware
//! ├── store/         # Catalog document persistence
//! ├── query/         # Listing query engine
//! ├── services/      # Image asset store
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod query;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use services::ImageStore;
pub use store::CatalogStore;
pub use utils::{AppError, AppResult, FieldErrors};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging. Call once at process start.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  __                           __
   / / / /___ _______   _____  _____/ /_
  / /_/ / __ `/ ___/ | / / _ \/ ___/ __/
 / __  / /_/ / /   | |/ /  __(__  ) /_
/_/ /_/\__,_/_/    |___/\___/____/\__/
    "#
    );
}
