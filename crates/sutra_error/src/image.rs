//! Image store error types.

/// Backend interaction performed by the image store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum Operation {
    /// Reading the source asset into memory
    #[display("read")]
    Read,
    /// Querying the fingerprint index
    #[display("lookup")]
    Lookup,
    /// Uploading to object storage
    #[display("upload")]
    Upload,
    /// Writing the fingerprint record
    #[display("record")]
    Record,
    /// Removing a redundant object
    #[display("remove")]
    Remove,
}

/// Kinds of image store errors.
///
/// Only `Read`, `Upload`, `TimedOut` and `Cancelled` are ever returned to
/// callers of the image store. `Lookup` and `Record` travel on the event
/// side channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ImageErrorKind {
    /// The source asset could not be read
    #[display("Failed to read asset: {}", _0)]
    Read(String),
    /// The fingerprint lookup failed
    #[display("Fingerprint lookup failed: {}", _0)]
    Lookup(String),
    /// The object upload failed
    #[display("Upload failed: {}", _0)]
    Upload(String),
    /// The fingerprint record could not be written
    #[display("Failed to record fingerprint: {}", _0)]
    Record(String),
    /// A backend call exceeded its deadline
    #[display("{} timed out after {}ms", operation, after_ms)]
    TimedOut {
        /// The interaction that timed out
        operation: Operation,
        /// Deadline that elapsed, in milliseconds
        after_ms: u64,
    },
    /// The caller cancelled the operation
    #[display("{} cancelled by caller", _0)]
    Cancelled(Operation),
}

/// Image store error with location tracking.
///
/// # Examples
///
/// ```
/// use sutra_error::{ImageError, ImageErrorKind, Operation};
///
/// let err = ImageError::new(ImageErrorKind::Cancelled(Operation::Upload));
/// assert!(format!("{}", err).contains("upload cancelled"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The kind of error that occurred
    pub kind: ImageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageError {
    /// Create a new image error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error was caused by caller cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ImageErrorKind::Cancelled(_))
    }
}
