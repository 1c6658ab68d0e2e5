//! Fingerprint lookup table trait.

use crate::{Fingerprint, ImageRecord, NewImageRecord};
use sutra_error::SutraResult;

/// Lookup table mapping fingerprints to stored image URLs.
///
/// Implementations must treat the fingerprint as a unique key: at most one
/// record exists per fingerprint.
#[async_trait::async_trait]
pub trait FingerprintIndex: Send + Sync {
    /// Point lookup by exact fingerprint.
    ///
    /// Returns `Ok(None)` on a genuine miss. Errors are reserved for backend
    /// failures.
    async fn find(&self, fingerprint: &Fingerprint) -> SutraResult<Option<ImageRecord>>;

    /// Insert a single record.
    ///
    /// No upsert semantics: inserting a fingerprint that already exists is an
    /// error.
    async fn insert(&self, record: NewImageRecord) -> SutraResult<()>;

    /// Atomically insert the record, or fetch the existing one if the
    /// fingerprint was already claimed.
    ///
    /// The returned record is the one that now owns the fingerprint. Its URL
    /// differs from `record.url` exactly when another writer got there first.
    async fn claim(&self, record: NewImageRecord) -> SutraResult<ImageRecord>;
}
