//! Side-channel outcomes of the deduplication flow.
//!
//! Lookup and record failures never reach the caller of the image store;
//! they are reported here instead so they can be logged or monitored.

use sutra_core::Fingerprint;

/// Something that happened while resolving an image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupEvent {
    /// The fingerprint was already recorded; no upload was performed.
    Hit {
        /// Fingerprint looked up
        fingerprint: Fingerprint,
        /// URL returned to the caller
        url: String,
    },
    /// The fingerprint was not recorded.
    Miss {
        /// Fingerprint looked up
        fingerprint: Fingerprint,
    },
    /// The lookup failed and was treated as a miss.
    LookupFailed {
        /// Fingerprint looked up
        fingerprint: Fingerprint,
        /// Backend error
        error: String,
    },
    /// The asset was uploaded.
    Uploaded {
        /// Fingerprint of the asset
        fingerprint: Fingerprint,
        /// Generated object name
        object: String,
        /// Public URL of the object
        url: String,
    },
    /// The upload failed; the caller receives an error.
    UploadFailed {
        /// Fingerprint of the asset
        fingerprint: Fingerprint,
        /// Backend error
        error: String,
    },
    /// The fingerprint → URL record was written.
    Recorded {
        /// Recorded fingerprint
        fingerprint: Fingerprint,
        /// Recorded URL
        url: String,
    },
    /// The record could not be written; the uploaded URL is still returned.
    RecordFailed {
        /// Fingerprint that was not recorded
        fingerprint: Fingerprint,
        /// Backend error
        error: String,
    },
    /// A concurrent upload of the same content recorded its URL first.
    RaceLost {
        /// Contested fingerprint
        fingerprint: Fingerprint,
        /// URL of the winning record, returned to the caller
        kept_url: String,
        /// URL of this call's redundant upload
        discarded_url: String,
    },
}

impl DedupEvent {
    /// Fingerprint the event concerns.
    pub fn fingerprint(&self) -> &Fingerprint {
        match self {
            DedupEvent::Hit { fingerprint, .. }
            | DedupEvent::Miss { fingerprint }
            | DedupEvent::LookupFailed { fingerprint, .. }
            | DedupEvent::Uploaded { fingerprint, .. }
            | DedupEvent::UploadFailed { fingerprint, .. }
            | DedupEvent::Recorded { fingerprint, .. }
            | DedupEvent::RecordFailed { fingerprint, .. }
            | DedupEvent::RaceLost { fingerprint, .. } => fingerprint,
        }
    }
}

/// Receiver for [`DedupEvent`]s.
pub trait DedupObserver: Send + Sync {
    /// Called once per event, in the order events occur within a call.
    fn on_event(&self, event: &DedupEvent);
}

/// Observer that writes every event to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DedupObserver for TracingObserver {
    fn on_event(&self, event: &DedupEvent) {
        match event {
            DedupEvent::Hit { fingerprint, url } => {
                tracing::debug!(%fingerprint, %url, "Image already stored");
            }
            DedupEvent::Miss { fingerprint } => {
                tracing::debug!(%fingerprint, "Image not stored yet");
            }
            DedupEvent::LookupFailed { fingerprint, error } => {
                tracing::warn!(%fingerprint, %error, "Fingerprint lookup failed, uploading anyway");
            }
            DedupEvent::Uploaded {
                fingerprint,
                object,
                url,
            } => {
                tracing::info!(%fingerprint, %object, %url, "Uploaded image");
            }
            DedupEvent::UploadFailed { fingerprint, error } => {
                tracing::error!(%fingerprint, %error, "Image upload failed");
            }
            DedupEvent::Recorded { fingerprint, url } => {
                tracing::info!(%fingerprint, %url, "Recorded image fingerprint");
            }
            DedupEvent::RecordFailed { fingerprint, error } => {
                tracing::warn!(%fingerprint, %error, "Failed to record image fingerprint");
            }
            DedupEvent::RaceLost {
                fingerprint,
                kept_url,
                discarded_url,
            } => {
                tracing::warn!(
                    %fingerprint,
                    %kept_url,
                    %discarded_url,
                    "Concurrent upload recorded first, discarding duplicate"
                );
            }
        }
    }
}
