//! Uploaded image assets.

use std::path::PathBuf;
use sutra_error::{ImageError, ImageErrorKind, SutraResult};

/// Where an asset's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Content already held in memory
    Bytes(Vec<u8>),
    /// Content to be read from a local file
    Path(PathBuf),
}

/// A binary asset handed to the image store, with the file name the user
/// uploaded it under.
///
/// # Examples
///
/// ```
/// use sutra_images::ImageAsset;
///
/// let cover = ImageAsset::from_bytes("gita.jpg", b"\xff\xd8\xff".to_vec());
/// assert_eq!(cover.file_name(), "gita.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    file_name: String,
    source: AssetSource,
}

impl ImageAsset {
    /// An asset whose content is already in memory.
    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            source: AssetSource::Bytes(data),
        }
    }

    /// An asset backed by a local file. The file name is taken from the
    /// path's final component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_name,
            source: AssetSource::Path(path),
        }
    }

    /// Original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Where the content comes from.
    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    /// Read the full content into memory.
    ///
    /// # Errors
    ///
    /// Returns an `ImageErrorKind::Read` error if a file-backed asset cannot
    /// be read.
    #[tracing::instrument(skip(self), fields(file_name = %self.file_name))]
    pub async fn read(&self) -> SutraResult<Vec<u8>> {
        match &self.source {
            AssetSource::Bytes(data) => Ok(data.clone()),
            AssetSource::Path(path) => {
                let data = tokio::fs::read(path).await.map_err(|e| {
                    ImageError::new(ImageErrorKind::Read(format!("{}: {}", path.display(), e)))
                })?;
                tracing::debug!(size = data.len(), "Read asset from disk");
                Ok(data)
            }
        }
    }
}
