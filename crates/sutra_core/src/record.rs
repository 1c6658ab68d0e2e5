//! Fingerprint → URL records.

use crate::Fingerprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted mapping from a fingerprint to the public URL of its stored
/// asset.
///
/// Records are created once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique key
    pub fingerprint: Fingerprint,
    /// Public URL of the stored asset
    pub url: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// A record about to be written.
///
/// # Examples
///
/// ```
/// use sutra_core::{Fingerprint, NewImageRecord};
///
/// let record = NewImageRecord::now(Fingerprint::new("abc="), "https://cdn/book-images/1_cover.jpg");
/// let persisted = record.clone().into_record();
/// assert_eq!(persisted.url, record.url);
/// assert_eq!(persisted.created_at, record.created_at);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewImageRecord {
    /// Unique key
    pub fingerprint: Fingerprint,
    /// Public URL of the stored asset
    pub url: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl NewImageRecord {
    /// A record stamped with the current time.
    pub fn now(fingerprint: Fingerprint, url: impl Into<String>) -> Self {
        Self {
            fingerprint,
            url: url.into(),
            created_at: Utc::now(),
        }
    }

    /// The record as it will read back once persisted.
    pub fn into_record(self) -> ImageRecord {
        ImageRecord {
            fingerprint: self.fingerprint,
            url: self.url,
            created_at: self.created_at,
        }
    }
}
