//! Configuration error types.

use std::fmt;

/// A configuration file that could not be loaded, or a setting that failed
/// validation.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// Dotted name of the offending setting, e.g. `images.bucket`
    pub setting: Option<String>,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Error about the configuration as a whole, such as an unreadable file.
    ///
    /// # Examples
    ///
    /// ```
    /// use sutra_error::ConfigError;
    ///
    /// let err = ConfigError::new("sutra.toml: invalid TOML");
    /// assert!(err.setting.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            setting: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error about a single setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use sutra_error::ConfigError;
    ///
    /// let err = ConfigError::for_setting("images.call_timeout_ms", "must be positive");
    /// assert!(err.to_string().contains("images.call_timeout_ms: must be positive"));
    /// ```
    #[track_caller]
    pub fn for_setting(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            setting: Some(setting.into()),
            ..Self::new(message)
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration Error: ")?;
        if let Some(setting) = &self.setting {
            write!(f, "{}: ", setting)?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}
