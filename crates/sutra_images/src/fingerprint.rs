//! Content fingerprints.
//!
//! The digest input is the base64 text of the asset bytes, followed by the
//! delimiter and the joined edition metadata when any metadata field is
//! non-empty. The SHA-256 of that input, base64-encoded, is the fingerprint.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use sutra_core::{EditionMetadata, Fingerprint, METADATA_DELIMITER};

/// Compute the fingerprint of `data` as published with `metadata`.
///
/// Identical bytes and metadata always produce the same fingerprint;
/// changing any metadata field produces a different one even when the
/// bytes are unchanged. Metadata that is absent or entirely empty leaves
/// the digest input as the bytes alone.
///
/// # Examples
///
/// ```
/// use sutra_core::EditionMetadata;
/// use sutra_images::compute_fingerprint;
///
/// let plain = compute_fingerprint(b"cover.jpg", None);
/// assert_eq!(plain.as_str(), "CLEgtlcbpPWoyqVKbCAOuwWEetFNuyw+2JS/BNWlfsM=");
///
/// let edition = EditionMetadata::default().with_author("A").with_title("B");
/// assert_ne!(compute_fingerprint(b"cover.jpg", Some(&edition)), plain);
/// ```
pub fn compute_fingerprint(data: &[u8], metadata: Option<&EditionMetadata>) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(STANDARD.encode(data).as_bytes());

    if let Some(metadata) = metadata.filter(|m| !m.is_empty()) {
        hasher.update(METADATA_DELIMITER.as_bytes());
        hasher.update(metadata.joined().as_bytes());
    }

    Fingerprint::new(STANDARD.encode(hasher.finalize()))
}
