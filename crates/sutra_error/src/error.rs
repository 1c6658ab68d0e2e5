//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{BackendError, ConfigError, ImageError, StorageError};

/// Every error condition in the workspace.
///
/// # Examples
///
/// ```
/// use sutra_error::{SutraError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::Unavailable("disk full".to_string()));
/// let err: SutraError = storage_err.into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SutraErrorKind {
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Image store error
    #[from(ImageError)]
    Image(ImageError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Sutra error with kind discrimination.
///
/// # Examples
///
/// ```
/// use sutra_error::{ConfigError, SutraResult};
///
/// fn might_fail() -> SutraResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Sutra Error: {}", _0)]
pub struct SutraError(Box<SutraErrorKind>);

impl SutraError {
    /// Create a new error from a kind.
    pub fn new(kind: SutraErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SutraErrorKind {
        &self.0
    }

    /// The image store error kind, if this is one.
    pub fn image_kind(&self) -> Option<&crate::ImageErrorKind> {
        match self.kind() {
            SutraErrorKind::Image(e) => Some(&e.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to SutraErrorKind
impl<T> From<T> for SutraError
where
    T: Into<SutraErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Sutra operations.
pub type SutraResult<T> = std::result::Result<T, SutraError>;
