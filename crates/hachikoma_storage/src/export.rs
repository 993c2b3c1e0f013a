//! Slide image export backend.

use hachikoma_core::{ImageData, ImageSet};
use hachikoma_error::{HachikomaResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes slide images into an export directory.
///
/// File naming is stable: `slide_<id>.<ext>`, so repeated exports of the
/// same slide overwrite the same file.
///
/// # Example
///
/// ```rust,ignore
/// use hachikoma_storage::ImageExporter;
///
/// let exporter = ImageExporter::new("./out")?;
/// exporter.export_slide(1, &image).await?;
/// exporter.export_all(&images).await?;
/// ```
pub struct ImageExporter {
    base_path: PathBuf,
}

impl ImageExporter {
    /// Create an exporter rooted at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> HachikomaResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        debug!(path = %base_path.display(), "Created export directory");
        Ok(Self { base_path })
    }

    /// The export directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path a slide image will be exported to.
    pub fn slide_path(&self, slide_id: u8, image: &ImageData) -> PathBuf {
        self.base_path
            .join(format!("slide_{}.{}", slide_id, image.extension()))
    }

    /// Write one slide image, replacing any previous export of that slide.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub async fn export_slide(&self, slide_id: u8, image: &ImageData) -> HachikomaResult<PathBuf> {
        let final_path = self.slide_path(slide_id, image);
        // Temp file + rename keeps the final path complete or absent
        let temp_path = self.base_path.join(format!(".slide_{}.tmp", slide_id));

        tokio::fs::write(&temp_path, &image.data)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    temp_path.display(),
                    e
                )))
            })?;

        tokio::fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    final_path.display(),
                    e
                )))
            })?;

        debug!(slide = slide_id, path = %final_path.display(), "Exported slide image");
        Ok(final_path)
    }

    /// Write every image in the set, one file per generated slide.
    ///
    /// Returns the written paths in ascending slide order. An empty set
    /// writes nothing.
    ///
    /// # Errors
    ///
    /// Returns error on the first file that cannot be written; earlier
    /// files remain.
    pub async fn export_all(&self, images: &ImageSet) -> HachikomaResult<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(images.len());
        for (slide_id, image) in images.iter() {
            paths.push(self.export_slide(slide_id, image).await?);
        }
        info!(count = paths.len(), path = %self.base_path.display(), "Exported image set");
        Ok(paths)
    }
}
