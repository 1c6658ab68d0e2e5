//! Generated object names.

use chrono::Utc;
use uuid::Uuid;

/// Unique name for an uploaded object.
///
/// Format: `{unix_millis}_{8 hex chars}_{sanitized file name}`. The
/// timestamp keeps names roughly ordered, the random component separates
/// uploads of the same file within one millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{}", _0)]
pub struct ObjectName(String);

impl ObjectName {
    /// Generate a fresh name for an upload of `file_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sutra_storage::ObjectName;
    ///
    /// let name = ObjectName::generate("my cover (1).jpg");
    /// assert!(name.as_str().ends_with("_my_cover__1_.jpg"));
    /// assert_ne!(name, ObjectName::generate("my cover (1).jpg"));
    /// ```
    pub fn generate(file_name: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        let nonce = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}_{}_{}",
            millis,
            &nonce[..8],
            sanitize_file_name(file_name)
        ))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Longest sanitized file name kept in an object name. With the timestamp
/// and nonce prefix this stays well under the common 255-byte limit.
pub const MAX_SANITIZED_LEN: usize = 128;

/// Longest suffix still treated as an extension when truncating.
const MAX_EXTENSION_LEN: usize = 16;

/// Replace every character outside `[A-Za-z0-9.]` with `_`.
///
/// An empty result becomes `"file"` so generated names never end in a bare
/// separator. Names longer than [`MAX_SANITIZED_LEN`] lose the end of their
/// stem; a short extension is kept.
///
/// # Examples
///
/// ```
/// use sutra_storage::{MAX_SANITIZED_LEN, sanitize_file_name};
///
/// let long = format!("{}.jpg", "a".repeat(300));
/// let sanitized = sanitize_file_name(&long);
/// assert_eq!(sanitized.len(), MAX_SANITIZED_LEN);
/// assert!(sanitized.ends_with("a.jpg"));
/// ```
pub fn sanitize_file_name(file_name: &str) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        return "file".to_string();
    }
    if sanitized.len() <= MAX_SANITIZED_LEN {
        return sanitized;
    }

    // Every character is ASCII here, so byte offsets are char boundaries.
    let extension = sanitized
        .rfind('.')
        .map(|dot| &sanitized[dot..])
        .filter(|ext| ext.len() <= MAX_EXTENSION_LEN)
        .unwrap_or_default();
    let stem_len = MAX_SANITIZED_LEN - extension.len();
    format!("{}{}", &sanitized[..stem_len], extension)
}
