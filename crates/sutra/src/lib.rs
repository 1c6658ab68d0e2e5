//! Temple Book Sutra - content-addressed cover image store
//!
//! Book covers uploaded at the bookstall are stored once per edition. The
//! store fingerprints each cover together with its edition metadata and
//! reuses the URL of an identical cover stored earlier.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sutra::{EditionMetadata, FileSystemObjectStore, ImageAsset, ImageStore, MemoryFingerprintIndex, SutraConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SutraConfig::load()?;
//!     let objects = Arc::new(FileSystemObjectStore::new(
//!         config.storage.base_path.clone(),
//!         config.storage.public_base_url.clone(),
//!     )?);
//!     let store = ImageStore::new(objects, Arc::new(MemoryFingerprintIndex::new()), config.images);
//!
//!     let metadata = EditionMetadata::default().with_author("Vyasa");
//!     let url = store.get_or_create_url(&ImageAsset::from_path("gita.jpg"), Some(&metadata)).await?;
//!     println!("{}", url);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `database` (default) - PostgreSQL fingerprint index
//!
//! # Architecture
//!
//! - `sutra_error` - Error types
//! - `sutra_core` - Fingerprints, metadata, records, the index trait
//! - `sutra_storage` - Object storage backends
//! - `sutra_database` - PostgreSQL fingerprint index
//! - `sutra_images` - The deduplicating image store
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;

pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};

pub use sutra_core::{
    EditionMetadata, Fingerprint, FingerprintIndex, ImageRecord, METADATA_DELIMITER,
    NewImageRecord,
};
#[cfg(feature = "database")]
pub use sutra_database::{PostgresFingerprintIndex, establish_connection, run_migrations};
#[cfg(feature = "database")]
pub use sutra_error::{DatabaseError, DatabaseErrorKind};
pub use sutra_error::{
    BackendError, ConfigError, ImageError, ImageErrorKind, Operation, StorageError,
    StorageErrorKind, SutraError, SutraErrorKind, SutraResult,
};
pub use sutra_images::{
    AssetSource, CancellationToken, DatabaseConfig, DedupEvent, DedupObserver, ImageAsset,
    ImageStore, ImageStoreConfig, LookupOutcome, MemoryFingerprintIndex, RecordMode,
    StorageConfig, StoredObject, SutraConfig, TracingObserver, compute_fingerprint,
};
pub use sutra_storage::{
    FileSystemObjectStore, ObjectName, ObjectStore, UploadOptions, sanitize_file_name,
};
