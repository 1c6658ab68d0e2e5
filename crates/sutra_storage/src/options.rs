//! Upload options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options recognised by [`ObjectStore::upload`](crate::ObjectStore::upload).
///
/// # Examples
///
/// ```
/// use sutra_storage::UploadOptions;
/// use std::time::Duration;
///
/// let options = UploadOptions::default();
/// assert_eq!(options.cache_control, Duration::from_secs(3600));
/// assert!(!options.upsert);
/// assert_eq!(options.cache_control_header(), "max-age=3600");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadOptions {
    /// How long clients may cache the object
    pub cache_control: Duration,
    /// Replace an existing object with the same name
    pub upsert: bool,
}

impl UploadOptions {
    /// Value for an HTTP `Cache-Control` header.
    pub fn cache_control_header(&self) -> String {
        format!("max-age={}", self.cache_control.as_secs())
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            cache_control: Duration::from_secs(3600),
            upsert: false,
        }
    }
}
