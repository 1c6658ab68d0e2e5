//! Configuration for the image store and its backends.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from sutra.toml)
//! - User overrides (./sutra.toml or ~/.config/sutra/sutra.toml)
//! - Automatic merging with user values taking precedence

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use sutra_error::{ConfigError, SutraError, SutraResult};
use sutra_storage::UploadOptions;
use tracing::{debug, instrument};

/// How the fingerprint record is written after a fresh upload.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum RecordMode {
    /// Await an atomic insert-or-fetch; concurrent uploads of the same
    /// content converge on the first recorded URL.
    #[default]
    #[display("claim")]
    Claim,
    /// Insert on a spawned task and return immediately; failures are only
    /// logged.
    #[display("detached")]
    Detached,
}

/// Image store settings.
///
/// ```toml
/// [images]
/// bucket = "book-images"
/// cache_control_secs = 3600
/// upsert = false
/// call_timeout_ms = 30000
/// record_mode = "claim"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageStoreConfig {
    /// Bucket cover images are uploaded into
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Cache lifetime advertised for uploaded objects, in seconds
    #[serde(default = "default_cache_control_secs")]
    pub cache_control_secs: u64,

    /// Replace an existing object with the same generated name
    #[serde(default)]
    pub upsert: bool,

    /// Deadline applied to each backend call, in milliseconds
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,

    /// How fingerprint records are written
    #[serde(default)]
    pub record_mode: RecordMode,
}

fn default_bucket() -> String {
    "book-images".to_string()
}

fn default_cache_control_secs() -> u64 {
    3600
}

fn default_call_timeout_ms() -> u64 {
    30_000
}

impl Default for ImageStoreConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            cache_control_secs: default_cache_control_secs(),
            upsert: false,
            call_timeout_ms: default_call_timeout_ms(),
            record_mode: RecordMode::default(),
        }
    }
}

impl ImageStoreConfig {
    /// Options passed to every upload.
    pub fn upload_options(&self) -> UploadOptions {
        UploadOptions {
            cache_control: Duration::from_secs(self.cache_control_secs),
            upsert: self.upsert,
        }
    }

    /// Deadline applied to each backend call.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> SutraResult<()> {
        if self.bucket.is_empty() || self.bucket.contains(['/', '\\']) {
            return Err(ConfigError::for_setting(
                "images.bucket",
                format!(
                    "must be a single non-empty path component, got {:?}",
                    self.bucket
                ),
            )
            .into());
        }
        if self.call_timeout_ms == 0 {
            return Err(
                ConfigError::for_setting("images.call_timeout_ms", "must be positive").into(),
            );
        }
        Ok(())
    }
}

/// Filesystem object storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory for buckets
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// URL under which `base_path` is served
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

fn default_base_path() -> PathBuf {
    PathBuf::from("./storage")
}

fn default_public_base_url() -> String {
    "http://localhost:8080/storage".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// Database settings. The connection string comes from `DATABASE_URL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_pool_size() -> u32 {
    4
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
        }
    }
}

/// Top-level configuration.
///
/// # Example
///
/// ```no_run
/// use sutra_images::SutraConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SutraConfig::load()?;
/// println!("Uploading into bucket {}", config.images.bucket);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct SutraConfig {
    /// Image store settings
    #[serde(default)]
    pub images: ImageStoreConfig,

    /// Object storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl SutraConfig {
    /// Load configuration from a specific file path, on top of the bundled
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SutraResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                SutraError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SutraError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.images.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (sutra.toml shipped with the crate)
    /// 2. User config in home directory (~/.config/sutra/sutra.toml)
    /// 3. User config in current directory (./sutra.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> SutraResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/sutra/sutra.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("sutra").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                SutraError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SutraError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.images.validate()?;
        Ok(config)
    }
}

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../sutra.toml");
