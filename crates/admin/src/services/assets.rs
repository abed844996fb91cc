//! Asset storage for preset files and preview images.
//!
//! Uploaded files land in the uploads directory under random UUID names
//! (original extension preserved) and are served read-only at `/uploads/*`.
//! Validation happens before anything touches disk so a rejected request
//! leaves no partial state behind.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use thiserror::Error;
use uuid::Uuid;

/// Per-file upload size limit (5 MB), matching the admin UI's check.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of preview images per preset.
pub const MAX_IMAGES: usize = 4;

/// Required extension for the downloadable preset asset (Lightroom preset).
pub const PRESET_FILE_EXTENSION: &str = ".lrtemplate";

/// Errors that can occur when validating or storing assets.
///
/// The validation variants carry the user-facing message verbatim.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Preset asset with the wrong extension.
    #[error("Only .lrtemplate files are allowed")]
    BadExtension,

    /// An image part without an image content type.
    #[error("{0} is not an image file")]
    NotAnImage(String),

    /// A file over the per-file size limit.
    #[error("{0} exceeds 5MB limit")]
    TooLarge(String),

    /// More preview images than allowed.
    #[error("Maximum 4 images allowed")]
    TooManyImages,

    /// Disk I/O failed while storing or removing a file.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file received from a multipart request, held in memory until the whole
/// request has been validated.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the browser.
    pub file_name: String,
    /// Content type of the part, if supplied.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Lowercased extension including the dot (e.g. ".jpg"), if any.
    fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
    }
}

/// Validate the downloadable preset asset: extension and size.
///
/// # Errors
///
/// Returns `AssetError::BadExtension` or `AssetError::TooLarge`.
pub fn validate_preset_file(file: &UploadedFile) -> Result<(), AssetError> {
    if file.extension().as_deref() != Some(PRESET_FILE_EXTENSION) {
        return Err(AssetError::BadExtension);
    }

    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AssetError::TooLarge(file.file_name.clone()));
    }

    Ok(())
}

/// Validate a set of preview images: count, per-file content type, per-file
/// size. Count is checked first so an oversized batch fails with the named
/// limit error before any per-file message.
///
/// # Errors
///
/// Returns `AssetError::TooManyImages`, `AssetError::NotAnImage`, or
/// `AssetError::TooLarge`.
pub fn validate_images(files: &[UploadedFile]) -> Result<(), AssetError> {
    if files.len() > MAX_IMAGES {
        return Err(AssetError::TooManyImages);
    }

    for file in files {
        let is_image = file
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(AssetError::NotAnImage(file.file_name.clone()));
        }

        if file.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AssetError::TooLarge(file.file_name.clone()));
        }
    }

    Ok(())
}

/// Stores uploaded files on local disk under random names.
#[derive(Clone, Debug)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Create an asset store rooted at the given directory.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The directory files are stored under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the uploads directory if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub async fn ensure_root(&self) -> Result<(), std::io::Error> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write an already-validated file to disk under a fresh UUID name,
    /// preserving the original extension. Returns the stored filename.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Io` if the write fails.
    pub async fn store(&self, file: &UploadedFile) -> Result<String, AssetError> {
        let extension = file.extension().unwrap_or_default();
        let stored_name = format!("{}{extension}", Uuid::new_v4());

        tokio::fs::write(self.root.join(&stored_name), &file.bytes).await?;

        tracing::debug!(
            original = %file.file_name,
            stored = %stored_name,
            size = file.bytes.len(),
            "Stored uploaded asset"
        );
        Ok(stored_name)
    }

    /// Remove a stored file, best-effort. Failures are logged, not
    /// propagated: a missing file must not fail the surrounding delete.
    pub async fn remove(&self, stored_name: &str) {
        // Stored names are server-generated UUIDs; refuse anything else so a
        // corrupted database row cannot reach outside the uploads directory.
        if stored_name.contains('/') || stored_name.contains("..") {
            tracing::warn!(name = %stored_name, "Refusing to remove suspicious asset name");
            return;
        }

        if let Err(e) = tokio::fs::remove_file(self.root.join(stored_name)).await {
            tracing::warn!(name = %stored_name, error = %e, "Failed to remove stored asset");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: Option<&str>, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: name.to_owned(),
            content_type: content_type.map(ToOwned::to_owned),
            bytes: Bytes::from(vec![0_u8; size]),
        }
    }

    #[test]
    fn test_preset_file_extension_check() {
        assert!(validate_preset_file(&file("moody.lrtemplate", None, 128)).is_ok());
        assert!(validate_preset_file(&file("Moody.LRTEMPLATE", None, 128)).is_ok());
        assert!(matches!(
            validate_preset_file(&file("moody.zip", None, 128)),
            Err(AssetError::BadExtension)
        ));
        assert!(matches!(
            validate_preset_file(&file("no-extension", None, 128)),
            Err(AssetError::BadExtension)
        ));
    }

    #[test]
    fn test_preset_file_size_limit() {
        assert!(validate_preset_file(&file("ok.lrtemplate", None, MAX_UPLOAD_BYTES)).is_ok());
        assert!(matches!(
            validate_preset_file(&file("big.lrtemplate", None, MAX_UPLOAD_BYTES + 1)),
            Err(AssetError::TooLarge(name)) if name == "big.lrtemplate"
        ));
    }

    #[test]
    fn test_image_count_limit() {
        let images: Vec<_> = (0..5)
            .map(|i| file(&format!("{i}.jpg"), Some("image/jpeg"), 16))
            .collect();
        assert!(matches!(
            validate_images(&images),
            Err(AssetError::TooManyImages)
        ));

        assert!(validate_images(&images[..4]).is_ok());
    }

    #[test]
    fn test_non_image_rejected_by_name() {
        let images = vec![
            file("cover.jpg", Some("image/jpeg"), 16),
            file("notes.pdf", Some("application/pdf"), 16),
        ];
        assert!(matches!(
            validate_images(&images),
            Err(AssetError::NotAnImage(name)) if name == "notes.pdf"
        ));
    }

    #[test]
    fn test_image_without_content_type_rejected() {
        let images = vec![file("mystery.bin", None, 16)];
        assert!(matches!(
            validate_images(&images),
            Err(AssetError::NotAnImage(_))
        ));
    }

    #[tokio::test]
    async fn test_store_and_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().to_path_buf());
        store.ensure_root().await.unwrap();

        let upload = file("preview.jpg", Some("image/jpeg"), 64);
        let stored = store.store(&upload).await.unwrap();

        assert!(stored.ends_with(".jpg"));
        assert!(dir.path().join(&stored).exists());

        store.remove(&stored).await;
        assert!(!dir.path().join(&stored).exists());
    }

    #[tokio::test]
    async fn test_remove_refuses_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().to_path_buf());

        // Must be a no-op, not an escape from the uploads root.
        store.remove("../outside.txt").await;
    }
}
