//! Backend error types.

use std::fmt;

/// Failure reported by a fingerprint index or a supporting task that has no
/// richer error type of its own, such as the in-memory index or the CLI's
/// setup tasks.
#[derive(Debug, Clone, derive_more::Error)]
pub struct BackendError {
    /// Backend that failed, e.g. `"memory index"`
    pub backend: Option<&'static str>,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use sutra_error::BackendError;
    ///
    /// let err = BackendError::new("duplicate fingerprint abc=").in_backend("memory index");
    /// assert_eq!(err.backend, Some("memory index"));
    /// assert!(err.to_string().contains("memory index: duplicate fingerprint"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            backend: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Name the backend that produced this error.
    pub fn in_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Backend Error: ")?;
        if let Some(backend) = self.backend {
            write!(f, "{}: ", backend)?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}
