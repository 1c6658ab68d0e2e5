//! The content-addressed image store.

use crate::guard::guarded;
use crate::{
    DedupEvent, DedupObserver, ImageAsset, ImageStoreConfig, RecordMode, TracingObserver,
    compute_fingerprint,
};
use std::sync::Arc;
use sutra_core::{EditionMetadata, Fingerprint, FingerprintIndex, ImageRecord, NewImageRecord};
use sutra_error::{ImageError, ImageErrorKind, Operation, SutraError, SutraResult};
use sutra_storage::{ObjectName, ObjectStore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Result of a fingerprint lookup, keeping backend failures distinct from
/// genuine misses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A record exists
    Hit(ImageRecord),
    /// No record exists
    Miss,
    /// The lookup failed; callers of [`ImageStore::lookup`] see this as a miss
    Failed(String),
}

impl LookupOutcome {
    /// URL of the existing record, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            LookupOutcome::Hit(record) => Some(&record.url),
            LookupOutcome::Miss | LookupOutcome::Failed(_) => None,
        }
    }
}

/// An uploaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Generated object name within the bucket
    pub name: String,
    /// Public URL
    pub url: String,
}

/// Deduplicating image store.
///
/// Keys uploaded images on a fingerprint of their bytes and edition
/// metadata. An image whose fingerprint is already recorded is never
/// uploaded again; its existing URL is returned instead.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use sutra_core::EditionMetadata;
/// use sutra_images::{ImageAsset, ImageStore, ImageStoreConfig, MemoryFingerprintIndex};
/// use sutra_storage::FileSystemObjectStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let objects = Arc::new(FileSystemObjectStore::new("/tmp/sutra", "https://cdn.example.org")?);
/// let index = Arc::new(MemoryFingerprintIndex::new());
/// let store = ImageStore::new(objects, index, ImageStoreConfig::default());
///
/// let cover = ImageAsset::from_path("gita.jpg");
/// let metadata = EditionMetadata::default().with_title("Bhagavad Gita");
///
/// let first = store.get_or_create_url(&cover, Some(&metadata)).await?;
/// let again = store.get_or_create_url(&cover, Some(&metadata)).await?;
/// assert_eq!(first, again);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ImageStore {
    objects: Arc<dyn ObjectStore>,
    index: Arc<dyn FingerprintIndex>,
    observer: Arc<dyn DedupObserver>,
    config: ImageStoreConfig,
}

impl ImageStore {
    /// Create a store over the given backends, logging events via `tracing`.
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        index: Arc<dyn FingerprintIndex>,
        config: ImageStoreConfig,
    ) -> Self {
        Self {
            objects,
            index,
            observer: Arc::new(TracingObserver),
            config,
        }
    }

    /// Replace the event observer.
    pub fn with_observer(mut self, observer: Arc<dyn DedupObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ImageStoreConfig {
        &self.config
    }

    fn emit(&self, event: DedupEvent) {
        self.observer.on_event(&event);
    }

    /// Read an asset and compute its fingerprint.
    ///
    /// # Errors
    ///
    /// Fails if the asset cannot be read within the call deadline.
    pub async fn compute_fingerprint(
        &self,
        asset: &ImageAsset,
        metadata: Option<&EditionMetadata>,
    ) -> SutraResult<Fingerprint> {
        let data = self.read(asset, &CancellationToken::new()).await?;
        Ok(compute_fingerprint(&data, metadata))
    }

    /// URL recorded for `fingerprint`, if any.
    ///
    /// Backend failures are reported as a `LookupFailed` event and otherwise
    /// treated as "not found".
    pub async fn lookup(&self, fingerprint: &Fingerprint) -> Option<String> {
        self.lookup_outcome(fingerprint).await.url().map(str::to_string)
    }

    /// Like [`lookup`](Self::lookup), but tells misses and failures apart.
    pub async fn lookup_outcome(&self, fingerprint: &Fingerprint) -> LookupOutcome {
        // A fresh token is never cancelled, so the error arm is unreachable.
        self.lookup_guarded(fingerprint, &CancellationToken::new())
            .await
            .unwrap_or_else(|e| LookupOutcome::Failed(e.to_string()))
    }

    /// Upload an asset under a freshly generated name.
    ///
    /// # Errors
    ///
    /// Fails if the asset cannot be read or the upload fails. No retry is
    /// attempted.
    pub async fn store(&self, asset: &ImageAsset) -> SutraResult<StoredObject> {
        let cancel = CancellationToken::new();
        let data = self.read(asset, &cancel).await?;
        self.upload(asset.file_name(), &data, &cancel).await
    }

    /// Return the URL of an identical, previously stored image, or upload
    /// this one and record it.
    ///
    /// # Errors
    ///
    /// Only asset read failures and upload failures are returned. Lookup
    /// failures fall back to uploading; record failures are logged and the
    /// uploaded URL is returned regardless.
    pub async fn get_or_create_url(
        &self,
        asset: &ImageAsset,
        metadata: Option<&EditionMetadata>,
    ) -> SutraResult<String> {
        self.get_or_create_url_with_cancel(asset, metadata, &CancellationToken::new())
            .await
    }

    /// [`get_or_create_url`](Self::get_or_create_url) with caller-controlled
    /// cancellation.
    ///
    /// Cancelling before the upload completes returns a `Cancelled` error.
    /// Once the upload has completed the URL is returned even if recording
    /// is cut short by cancellation.
    #[instrument(skip_all, fields(file_name = %asset.file_name(), fingerprint = tracing::field::Empty))]
    pub async fn get_or_create_url_with_cancel(
        &self,
        asset: &ImageAsset,
        metadata: Option<&EditionMetadata>,
        cancel: &CancellationToken,
    ) -> SutraResult<String> {
        let data = self.read(asset, cancel).await?;
        let fingerprint = compute_fingerprint(&data, metadata);
        tracing::Span::current().record("fingerprint", tracing::field::display(&fingerprint));

        if let LookupOutcome::Hit(record) = self.lookup_guarded(&fingerprint, cancel).await? {
            return Ok(record.url);
        }

        let stored = match self.upload(asset.file_name(), &data, cancel).await {
            Ok(stored) => stored,
            Err(e) => {
                if !is_cancelled(&e) {
                    self.emit(DedupEvent::UploadFailed {
                        fingerprint,
                        error: e.to_string(),
                    });
                }
                return Err(e);
            }
        };
        self.emit(DedupEvent::Uploaded {
            fingerprint: fingerprint.clone(),
            object: stored.name.clone(),
            url: stored.url.clone(),
        });

        match self.config.record_mode {
            RecordMode::Claim => Ok(self.claim(fingerprint, stored, cancel).await),
            RecordMode::Detached => {
                self.record_detached(fingerprint, stored.url.clone());
                Ok(stored.url)
            }
        }
    }

    async fn read(&self, asset: &ImageAsset, cancel: &CancellationToken) -> SutraResult<Vec<u8>> {
        guarded(Operation::Read, self.config.call_timeout(), cancel, asset.read()).await
    }

    /// Lookup with events. Errors only on cancellation.
    async fn lookup_guarded(
        &self,
        fingerprint: &Fingerprint,
        cancel: &CancellationToken,
    ) -> SutraResult<LookupOutcome> {
        let outcome = match guarded(
            Operation::Lookup,
            self.config.call_timeout(),
            cancel,
            self.index.find(fingerprint),
        )
        .await
        {
            Ok(Some(record)) => LookupOutcome::Hit(record),
            Ok(None) => LookupOutcome::Miss,
            Err(e) if is_cancelled(&e) => return Err(e),
            Err(e) => LookupOutcome::Failed(e.to_string()),
        };

        let event = match &outcome {
            LookupOutcome::Hit(record) => DedupEvent::Hit {
                fingerprint: fingerprint.clone(),
                url: record.url.clone(),
            },
            LookupOutcome::Miss => DedupEvent::Miss {
                fingerprint: fingerprint.clone(),
            },
            LookupOutcome::Failed(error) => DedupEvent::LookupFailed {
                fingerprint: fingerprint.clone(),
                error: error.clone(),
            },
        };
        self.emit(event);

        Ok(outcome)
    }

    async fn upload(
        &self,
        file_name: &str,
        data: &[u8],
        cancel: &CancellationToken,
    ) -> SutraResult<StoredObject> {
        let name = ObjectName::generate(file_name);
        let bucket = &self.config.bucket;
        let options = self.config.upload_options();

        guarded(
            Operation::Upload,
            self.config.call_timeout(),
            cancel,
            self.objects.upload(bucket, name.as_str(), data, &options),
        )
        .await
        .map_err(|e| {
            let from_guard = matches!(
                e.image_kind(),
                Some(ImageErrorKind::TimedOut { .. } | ImageErrorKind::Cancelled(_))
            );
            if from_guard {
                e
            } else {
                SutraError::from(ImageError::new(ImageErrorKind::Upload(e.to_string())))
            }
        })?;

        let url = self.objects.public_url(bucket, name.as_str());
        debug!(object = %name, %url, size = data.len(), "Uploaded asset");
        Ok(StoredObject {
            name: name.as_str().to_string(),
            url,
        })
    }

    /// Record the upload through the index's atomic claim and return the URL
    /// the caller should use.
    async fn claim(
        &self,
        fingerprint: Fingerprint,
        stored: StoredObject,
        cancel: &CancellationToken,
    ) -> String {
        let record = NewImageRecord::now(fingerprint.clone(), stored.url.clone());

        match guarded(
            Operation::Record,
            self.config.call_timeout(),
            cancel,
            self.index.claim(record),
        )
        .await
        {
            Ok(winner) if winner.url == stored.url => {
                self.emit(DedupEvent::Recorded {
                    fingerprint,
                    url: stored.url.clone(),
                });
                stored.url
            }
            Ok(winner) => {
                self.emit(DedupEvent::RaceLost {
                    fingerprint,
                    kept_url: winner.url.clone(),
                    discarded_url: stored.url.clone(),
                });
                self.discard(&stored).await;
                winner.url
            }
            Err(e) => {
                self.emit(DedupEvent::RecordFailed {
                    fingerprint,
                    error: e.to_string(),
                });
                stored.url
            }
        }
    }

    /// Best-effort removal of an upload that lost a claim race.
    async fn discard(&self, stored: &StoredObject) {
        let removed = guarded(
            Operation::Remove,
            self.config.call_timeout(),
            &CancellationToken::new(),
            self.objects.remove(&self.config.bucket, &stored.name),
        )
        .await;

        if let Err(e) = removed {
            warn!(object = %stored.name, error = %e, "Failed to remove redundant upload");
        }
    }

    /// Fire-and-forget insert of the fingerprint record.
    fn record_detached(&self, fingerprint: Fingerprint, url: String) {
        let index = Arc::clone(&self.index);
        let observer = Arc::clone(&self.observer);
        let deadline = self.config.call_timeout();

        tokio::spawn(async move {
            let record = NewImageRecord::now(fingerprint.clone(), url.clone());
            let event = match guarded(
                Operation::Record,
                deadline,
                &CancellationToken::new(),
                index.insert(record),
            )
            .await
            {
                Ok(()) => DedupEvent::Recorded { fingerprint, url },
                Err(e) => DedupEvent::RecordFailed {
                    fingerprint,
                    error: e.to_string(),
                },
            };
            observer.on_event(&event);
        });
    }
}

fn is_cancelled(err: &SutraError) -> bool {
    matches!(err.image_kind(), Some(ImageErrorKind::Cancelled(_)))
}
