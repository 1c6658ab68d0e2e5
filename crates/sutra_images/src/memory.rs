//! In-process fingerprint index.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use sutra_core::{Fingerprint, FingerprintIndex, ImageRecord, NewImageRecord};
use sutra_error::{BackendError, SutraResult};
use tokio::sync::RwLock;

/// Fingerprint index held in memory.
///
/// Suitable for tests and single-process deployments. Uniqueness is enforced
/// by the map key; `claim` holds the write lock across the check and the
/// insert.
#[derive(Debug, Default)]
pub struct MemoryFingerprintIndex {
    records: RwLock<HashMap<Fingerprint, ImageRecord>>,
}

impl MemoryFingerprintIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the index holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl FingerprintIndex for MemoryFingerprintIndex {
    async fn find(&self, fingerprint: &Fingerprint) -> SutraResult<Option<ImageRecord>> {
        Ok(self.records.read().await.get(fingerprint).cloned())
    }

    async fn insert(&self, record: NewImageRecord) -> SutraResult<()> {
        match self.records.write().await.entry(record.fingerprint.clone()) {
            Entry::Occupied(_) => Err(BackendError::new(format!(
                "duplicate fingerprint {}",
                record.fingerprint
            ))
            .in_backend("memory index")
            .into()),
            Entry::Vacant(slot) => {
                slot.insert(record.into_record());
                Ok(())
            }
        }
    }

    async fn claim(&self, record: NewImageRecord) -> SutraResult<ImageRecord> {
        let mut records = self.records.write().await;
        let winner = records
            .entry(record.fingerprint.clone())
            .or_insert_with(|| record.into_record());
        Ok(winner.clone())
    }
}
