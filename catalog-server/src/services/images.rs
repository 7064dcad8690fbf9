//! Image asset store
//!
//! Uploaded product images live as flat files under the work directory
//! (`<work_dir>/public/images/`). The catalog document stores only the bare
//! filename; the public URL is derived per response via [`image_url`], so
//! relocating the server or changing `PUBLIC_BASE_URL` never requires a
//! data migration.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::utils::AppError;

const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Derive the public URL for a stored image filename.
pub fn image_url(base: &str, filename: Option<&str>) -> Option<String> {
    filename.map(|f| format!("{}/public/images/{f}", base.trim_end_matches('/')))
}

/// Disk-backed store for uploaded product images.
pub struct ImageStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, max_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist an uploaded image and return its generated filename.
    ///
    /// The filename is the upload timestamp in unix milliseconds plus the
    /// original extension; it is bumped forward while a file with that name
    /// already exists, so rapid uploads never overwrite each other.
    ///
    /// Rejections (all 400, keyed on `image`):
    /// - payload larger than the configured limit
    /// - extension outside png/jpg/jpeg/webp
    /// - bytes that do not decode as an image, whatever the extension says
    pub fn save(&self, original_name: &str, data: &[u8]) -> Result<String, AppError> {
        if data.len() > self.max_bytes {
            return Err(AppError::upload("File size should be less than 5MB"));
        }

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| AppError::upload("Only image files are allowed!"))?;

        if image::load_from_memory(data).is_err() {
            return Err(AppError::upload("Only image files are allowed!"));
        }

        let mut stamp = Utc::now().timestamp_millis();
        let mut filename = format!("{stamp}.{ext}");
        while self.dir.join(&filename).exists() {
            stamp += 1;
            filename = format!("{stamp}.{ext}");
        }

        std::fs::write(self.dir.join(&filename), data)
            .map_err(|e| AppError::internal(format!("failed to store image: {e}")))?;

        tracing::debug!(filename = %filename, bytes = data.len(), "Stored uploaded image");
        Ok(filename)
    }

    /// Remove a stored image. Best effort: a missing file or IO failure is
    /// logged and swallowed so record deletion never fails on asset cleanup.
    pub fn delete(&self, filename: &str) {
        let Some(path) = self.path_of(filename) else {
            return;
        };
        if let Err(e) = std::fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to delete image asset");
        }
    }

    /// Resolve a filename inside the store, refusing anything that could
    /// escape the images directory.
    pub fn path_of(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return None;
        }
        Some(self.dir.join(filename))
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path_of(filename).is_some_and(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal valid 1x1 PNG, produced through the image crate
    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(1, 1, image::Rgb([10, 200, 30]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    fn store(max_bytes: usize) -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("images"), max_bytes).unwrap();
        (dir, store)
    }

    #[test]
    fn save_and_delete() {
        let (_dir, store) = store(1024 * 1024);
        let filename = store.save("photo.png", &tiny_png()).unwrap();
        assert!(filename.ends_with(".png"));
        assert!(store.exists(&filename));

        store.delete(&filename);
        assert!(!store.exists(&filename));
        // second delete is a no-op
        store.delete(&filename);
    }

    #[test]
    fn rapid_uploads_get_distinct_names() {
        let (_dir, store) = store(1024 * 1024);
        let data = tiny_png();
        let a = store.save("a.png", &data).unwrap();
        let b = store.save("b.png", &data).unwrap();
        let c = store.save("c.png", &data).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn oversized_upload_is_rejected() {
        let (_dir, store) = store(8);
        let err = store.save("big.png", &tiny_png()).unwrap_err();
        assert!(err.to_string().contains("less than 5MB"));
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let (_dir, store) = store(1024 * 1024);
        assert!(store.save("notes.txt", &tiny_png()).is_err());
        assert!(store.save("archive.pdf", b"%PDF-1.4").is_err());
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        let (_dir, store) = store(1024 * 1024);
        assert!(store.save("fake.png", b"definitely not a png").is_err());
    }

    #[test]
    fn traversal_names_are_refused() {
        let (_dir, store) = store(1024 * 1024);
        assert!(store.path_of("../../../etc/passwd").is_none());
        assert!(store.path_of("a/b.png").is_none());
        assert!(store.path_of("a\\b.png").is_none());
        assert!(store.path_of("1700000000000.png").is_some());
    }

    #[test]
    fn url_derivation() {
        assert_eq!(
            image_url("http://localhost:4000", Some("1.png")),
            Some("http://localhost:4000/public/images/1.png".to_string())
        );
        assert_eq!(
            image_url("http://localhost:4000/", Some("1.png")),
            Some("http://localhost:4000/public/images/1.png".to_string())
        );
        assert_eq!(image_url("http://localhost:4000", None), None);
    }
}
