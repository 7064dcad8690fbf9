use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Maximum accepted upload size (5MB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (catalog file, images) |
/// | HTTP_PORT | 4000 | HTTP service port |
/// | PUBLIC_BASE_URL | http://localhost:{port} | Base for derived image URLs |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/harvest HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the catalog document and uploaded images
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Fully qualified base URL used when deriving image URLs
    pub public_base_url: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4000);

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port,
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{http_port}")),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            jwt: JwtConfig::default(),
        }
    }

    /// Override the work dir and port, used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.public_base_url = format!("http://localhost:{http_port}");
        config
    }

    /// Path of the catalog document
    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("db.json")
    }

    /// Directory holding uploaded product images
    pub fn images_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("public").join("images")
    }

    /// Create the work directory layout if it does not exist yet
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(PathBuf::from(&self.work_dir))?;
        std::fs::create_dir_all(self.images_dir())
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_flag_follows_environment() {
        let mut config = Config::with_overrides("/tmp/harvest-test", 4000);

        config.environment = "development".to_string();
        assert!(config.is_development());

        config.environment = "production".to_string();
        assert!(!config.is_development());
    }
}
