use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::services::{ImageStore, image_url};
use crate::store::CatalogStore;

/// Server state - shared references to every service
///
/// Cloning is shallow (Arc), every handler receives a copy.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | store | Arc<CatalogStore> | catalog document persistence |
/// | images | Arc<ImageStore> | uploaded image assets |
/// | jwt_service | Arc<JwtService> | token issuing / verification |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<CatalogStore>,
    pub images: Arc<ImageStore>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize the server state.
    ///
    /// Creates the work directory layout, then wires the catalog store,
    /// the image store and the JWT service.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;
        crate::utils::set_expose_internal_detail(config.is_development());

        let store = Arc::new(CatalogStore::new(config.catalog_path()));
        let images = Arc::new(ImageStore::new(
            config.images_dir(),
            config.max_upload_bytes,
        )?);
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            store,
            images,
            jwt_service,
        })
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Derive the public URL for an image filename (None when absent)
    pub fn image_url(&self, filename: Option<&str>) -> Option<String> {
        image_url(&self.config.public_base_url, filename)
    }
}
