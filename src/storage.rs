// SPDX-License-Identifier: GPL-3.0-only

//! Saving photos to disk

use crate::constants::app_info::PHOTO_DIR_NAME;
use crate::errors::AppError;
use crate::photo::PhotoRecord;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Directory downloads and CLI snapshots go to (`~/Pictures/photobooth`)
pub fn photo_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(std::env::temp_dir)
        .join(PHOTO_DIR_NAME)
}

/// Ask the user where to save a photo
///
/// Returns `None` if the dialog was cancelled.
pub async fn choose_download_path(default_name: String) -> Option<PathBuf> {
    let start_dir = photo_dir();
    if let Err(e) = tokio::fs::create_dir_all(&start_dir).await {
        debug!(error = %e, dir = %start_dir.display(), "Could not create photo directory");
    }

    let handle = rfd::AsyncFileDialog::new()
        .set_directory(&start_dir)
        .set_file_name(default_name)
        .add_filter("JPEG", &["jpg", "jpeg"])
        .save_file()
        .await?;
    Some(handle.path().to_path_buf())
}

/// Write encoded bytes to `path`, creating parent directories
pub async fn write_photo(path: PathBuf, bytes: Arc<[u8]>) -> Result<PathBuf, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &bytes[..]).await?;
    info!(path = %path.display(), size = bytes.len(), "Photo saved");
    Ok(path)
}

/// Offer a record for download through the save dialog
///
/// Returns the written path, or `None` if the user cancelled.
pub async fn download(photo: PhotoRecord) -> Result<Option<PathBuf>, AppError> {
    let Some(path) = choose_download_path(photo.download_name()).await else {
        debug!(id = %photo.id, "Download cancelled");
        return Ok(None);
    };
    write_photo(path, photo.image.shared_bytes()).await.map(Some)
}

/// Default path for a photo in `dir`, named after its capture time
pub fn default_photo_path(dir: &Path, photo: &PhotoRecord) -> PathBuf {
    dir.join(photo.download_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_dir_name() {
        assert!(photo_dir().ends_with("photobooth"));
    }

    #[tokio::test]
    async fn test_write_photo_creates_directories() {
        let root = std::env::temp_dir().join(format!("photobooth-test-{}", uuid::Uuid::new_v4()));
        let path = root.join("nested").join("shot.jpg");

        let written = write_photo(path.clone(), Arc::from(vec![0xFF, 0xD8, 0xFF, 0xD9]))
            .await
            .unwrap();

        assert_eq!(written, path);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        let _ = std::fs::remove_dir_all(root);
    }
}
