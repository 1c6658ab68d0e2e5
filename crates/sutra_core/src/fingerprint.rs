//! Content fingerprint newtype.

use serde::{Deserialize, Serialize};

/// Content-derived digest used as the deduplication key for stored images.
///
/// A fingerprint is the base64 encoding of a SHA-256 digest. The type does
/// not validate its contents so that keys read back from a lookup table can
/// be wrapped as-is.
///
/// # Examples
///
/// ```
/// use sutra_core::Fingerprint;
///
/// let fp = Fingerprint::new("n4bQgYhMfWWaL+qgxVrQFaO/TxsrC4Is0V1sFbDwCgg=");
/// assert_eq!(fp.as_str().len(), 44);
/// assert_eq!(fp.to_string(), fp.as_str());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an encoded digest.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fingerprint, returning the encoded digest.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
