//! Test doubles for the image store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sutra_core::{Fingerprint, FingerprintIndex, ImageRecord, NewImageRecord};
use sutra_error::{BackendError, StorageError, StorageErrorKind, SutraResult};
use sutra_images::{DedupEvent, DedupObserver, MemoryFingerprintIndex};
use sutra_storage::{ObjectStore, UploadOptions};
use tokio::sync::Barrier;

/// Object store that keeps objects in memory and counts uploads.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    uploads: AtomicUsize,
    fail_uploads: AtomicBool,
    upload_delay: Mutex<Option<Duration>>,
}

impl MemoryObjectStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let store = Self::default();
        store.fail_uploads.store(true, Ordering::SeqCst);
        Arc::new(store)
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        let store = Self::default();
        *store.upload_delay.lock().unwrap() = Some(delay);
        Arc::new(store)
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> SutraResult<()> {
        self.uploads.fetch_add(1, Ordering::SeqCst);

        let delay = *self.upload_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Unavailable(
                "bucket offline".to_string(),
            ))
            .into());
        }

        let mut objects = self.objects.lock().unwrap();
        let key = (bucket.to_string(), name.to_string());
        if !options.upsert && objects.contains_key(&key) {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists(name.to_string())).into());
        }
        objects.insert(key, data.to_vec());
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("https://cdn.test/{}/{}", bucket, name)
    }

    async fn remove(&self, bucket: &str, name: &str) -> SutraResult<()> {
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(name.to_string())).into())
    }

    async fn exists(&self, bucket: &str, name: &str) -> SutraResult<bool> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), name.to_string())))
    }
}

/// Index wrapper whose operations can be made to fail, stall or rendezvous.
#[derive(Default)]
pub struct ScriptedIndex {
    pub inner: MemoryFingerprintIndex,
    pub fail_find: AtomicBool,
    pub fail_writes: AtomicBool,
    pub find_delay: Mutex<Option<Duration>>,
    pub find_barrier: Mutex<Option<Arc<Barrier>>>,
    pub writes: AtomicUsize,
}

impl ScriptedIndex {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_find() -> Arc<Self> {
        let index = Self::default();
        index.fail_find.store(true, Ordering::SeqCst);
        Arc::new(index)
    }

    pub fn failing_writes() -> Arc<Self> {
        let index = Self::default();
        index.fail_writes.store(true, Ordering::SeqCst);
        Arc::new(index)
    }

    pub fn slow_find(delay: Duration) -> Arc<Self> {
        let index = Self::default();
        *index.find_delay.lock().unwrap() = Some(delay);
        Arc::new(index)
    }

    /// Every `find` waits until `parties` lookups are in flight.
    pub fn rendezvous(parties: usize) -> Arc<Self> {
        let index = Self::default();
        *index.find_barrier.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
        Arc::new(index)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FingerprintIndex for ScriptedIndex {
    async fn find(&self, fingerprint: &Fingerprint) -> SutraResult<Option<ImageRecord>> {
        let delay = *self.find_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let found = self.inner.find(fingerprint).await;

        let barrier = self.find_barrier.lock().unwrap().clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }

        if self.fail_find.load(Ordering::SeqCst) {
            return Err(BackendError::new("lookup table unavailable").into());
        }
        found
    }

    async fn insert(&self, record: NewImageRecord) -> SutraResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::new("insert rejected").into());
        }
        self.inner.insert(record).await
    }

    async fn claim(&self, record: NewImageRecord) -> SutraResult<ImageRecord> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::new("insert rejected").into());
        }
        self.inner.claim(record).await
    }
}

/// Observer that keeps every event.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<DedupEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DedupEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&DedupEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl DedupObserver for RecordingObserver {
    fn on_event(&self, event: &DedupEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
