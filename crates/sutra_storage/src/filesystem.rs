//! Filesystem-based object storage.
//!
//! Objects are written under `{base_path}/{bucket}/{name}` and served by
//! whatever static file server fronts `base_path`; public URLs are built from
//! a configured base URL.

use crate::{ObjectStore, UploadOptions};
use std::path::{Path, PathBuf};
use sutra_error::{StorageError, StorageErrorKind, SutraError, SutraResult};
use uuid::Uuid;

/// Filesystem storage backend.
///
/// # Example Structure
///
/// ```text
/// /var/sutra/storage/
/// └── book-images/
///     ├── 1718000000000_1a2b3c4d_gita_cover.jpg
///     └── 1718000004211_9f8e7d6c_ramayana.png
/// ```
///
/// Writes go to a temporary file in the bucket directory and are moved
/// into place, so readers never observe a partial object. Without `upsert`
/// the move is a hard link, which fails if another writer created the
/// object first.
#[derive(Debug, Clone)]
pub struct FileSystemObjectStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl FileSystemObjectStore {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Root directory for buckets
    /// * `public_base_url` - URL under which `base_path` is served
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path, public_base_url))]
    pub fn new(
        base_path: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> SutraResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();

        tracing::info!(
            path = %base_path.display(),
            public_base_url = %public_base_url,
            "Created filesystem object store"
        );
        Ok(Self {
            base_path,
            public_base_url,
        })
    }

    /// Root directory of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Filesystem path of `bucket/name`, rejecting anything that could
    /// escape the bucket directory.
    fn object_path(&self, bucket: &str, name: &str) -> SutraResult<PathBuf> {
        for component in [bucket, name] {
            if component.is_empty()
                || component == "."
                || component == ".."
                || component.contains(['/', '\\'])
            {
                return Err(StorageError::new(StorageErrorKind::InvalidName(format!(
                    "{}/{}",
                    bucket, name
                )))
                .into());
            }
        }

        Ok(self.base_path.join(bucket).join(name))
    }
}

#[async_trait::async_trait]
impl ObjectStore for FileSystemObjectStore {
    #[tracing::instrument(skip(self, data, options), fields(size = data.len(), upsert = options.upsert))]
    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> SutraResult<()> {
        let path = self.object_path(bucket, name)?;

        if !options.upsert && probe_exists(&path).await? {
            return Err(already_exists(bucket, name));
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then move into place for atomicity
        let temp_path = path.with_file_name(format!(".{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        // rename replaces an existing target; hard_link refuses to, which
        // keeps create-only uploads atomic against concurrent writers.
        let placed = if options.upsert {
            tokio::fs::rename(&temp_path, &path).await
        } else {
            let linked = tokio::fs::hard_link(&temp_path, &path).await;
            if linked.is_ok() {
                let _ = tokio::fs::remove_file(&temp_path).await;
            }
            linked
        };

        if let Err(e) = placed {
            let _ = tokio::fs::remove_file(&temp_path).await;
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                return Err(already_exists(bucket, name));
            }
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "move {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        tracing::info!(
            bucket,
            name,
            size = data.len(),
            cache_control = %options.cache_control_header(),
            "Stored object"
        );

        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, bucket, name)
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, bucket: &str, name: &str) -> SutraResult<()> {
        let path = self.object_path(bucket, name)?;

        tokio::fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(format!("{}/{}", bucket, name)))
            } else {
                StorageError::new(StorageErrorKind::FileRemove(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::info!(bucket, name, "Removed object");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, bucket: &str, name: &str) -> SutraResult<bool> {
        let path = self.object_path(bucket, name)?;
        probe_exists(&path).await
    }
}

/// Whether `path` exists. I/O failures other than "not found" are errors,
/// not absence.
async fn probe_exists(path: &Path) -> SutraResult<bool> {
    tokio::fs::try_exists(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::Unavailable(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()
    })
}

fn already_exists(bucket: &str, name: &str) -> SutraError {
    StorageError::new(StorageErrorKind::AlreadyExists(format!("{}/{}", bucket, name))).into()
}
