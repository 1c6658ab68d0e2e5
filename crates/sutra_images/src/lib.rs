//! Content-addressed cover image store for Temple Book Sutra.
//!
//! Book covers are uploaded once per edition. Before uploading, the store
//! fingerprints the image bytes together with the edition metadata and
//! checks a lookup table; an identical cover that was stored before is
//! served from its existing URL.
//!
//! # Flow
//!
//! 1. Fingerprint the asset ([`compute_fingerprint`]).
//! 2. Look the fingerprint up; on a hit, return the recorded URL.
//! 3. Otherwise upload under a generated name and take its public URL.
//! 4. Record fingerprint → URL and return the URL.
//!
//! Lookup failures fall back to uploading and record failures are absorbed;
//! both are reported to a [`DedupObserver`] rather than to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod config;
mod events;
mod fingerprint;
mod guard;
mod memory;
mod store;

pub use asset::{AssetSource, ImageAsset};
pub use config::{DatabaseConfig, ImageStoreConfig, RecordMode, StorageConfig, SutraConfig};
pub use events::{DedupEvent, DedupObserver, TracingObserver};
pub use fingerprint::compute_fingerprint;
pub use memory::MemoryFingerprintIndex;
pub use store::{ImageStore, LookupOutcome, StoredObject};
pub use tokio_util::sync::CancellationToken;
