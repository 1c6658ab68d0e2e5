//! Storage trait definition.

use crate::UploadOptions;
use sutra_error::SutraResult;

/// Trait for pluggable object storage backends.
///
/// Objects live in named buckets under caller-chosen names. Implementations
/// only move bytes; deduplication is decided by the image store before an
/// upload is attempted.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `bucket/name`.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket to store into
    /// * `name` - Object name, unique within the bucket
    /// * `data` - The binary content
    /// * `options` - Cache lifetime and whether an existing object may be replaced
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` when the object exists and
    /// `options.upsert` is false.
    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> SutraResult<()>;

    /// Public URL of `bucket/name`.
    ///
    /// Deterministic and performs no I/O; the object does not need to exist.
    fn public_url(&self, bucket: &str, name: &str) -> String;

    /// Remove `bucket/name`.
    async fn remove(&self, bucket: &str, name: &str) -> SutraResult<()>;

    /// Check whether `bucket/name` exists.
    async fn exists(&self, bucket: &str, name: &str) -> SutraResult<bool>;
}
