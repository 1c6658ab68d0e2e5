//! Core data types for the Temple Book Sutra image store.
//!
//! This crate holds the types shared by the image store and its backends:
//! fingerprints, edition metadata, the persisted fingerprint record and the
//! [`FingerprintIndex`] trait that lookup tables implement.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fingerprint;
mod index;
mod metadata;
mod record;

pub use fingerprint::Fingerprint;
pub use index::FingerprintIndex;
pub use metadata::{EditionMetadata, METADATA_DELIMITER};
pub use record::{ImageRecord, NewImageRecord};
