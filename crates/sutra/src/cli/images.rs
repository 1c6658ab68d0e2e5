//! Image command handlers.

use super::commands::{EditionArgs, OutputFormat};
use std::path::{Path, PathBuf};
use sutra::{ImageAsset, SutraConfig, SutraResult, compute_fingerprint};

/// Load configuration from `path` if given, otherwise from the standard locations.
pub fn load_config(path: Option<&Path>) -> SutraResult<SutraConfig> {
    match path {
        Some(path) => SutraConfig::from_file(path),
        None => SutraConfig::load(),
    }
}

/// Print the fingerprint of an image file.
#[tracing::instrument(skip(edition))]
pub async fn fingerprint(file: &Path, edition: &EditionArgs) -> SutraResult<()> {
    let data = ImageAsset::from_path(file).read().await?;
    let fingerprint = compute_fingerprint(&data, edition.metadata().as_ref());
    println!("{}", fingerprint);
    Ok(())
}

#[cfg(feature = "database")]
mod database {
    use super::*;
    use std::sync::Arc;
    use sutra::{
        BackendError, CancellationToken, FileSystemObjectStore, Fingerprint, ImageStore,
        LookupOutcome, PostgresFingerprintIndex,
    };

    fn to_json(value: &serde_json::Value) -> SutraResult<String> {
        serde_json::to_string_pretty(value)
            .map_err(|e| BackendError::new(format!("JSON encoding failed: {}", e)).into())
    }

    async fn open_store(config: SutraConfig) -> SutraResult<ImageStore> {
        let objects = Arc::new(FileSystemObjectStore::new(
            config.storage.base_path.clone(),
            config.storage.public_base_url.clone(),
        )?);

        let pool_size = config.database.pool_size;
        let index =
            tokio::task::spawn_blocking(move || PostgresFingerprintIndex::connect(pool_size))
                .await
                .map_err(|e| BackendError::new(format!("Database setup task failed: {}", e)))??;

        Ok(ImageStore::new(objects, Arc::new(index), config.images))
    }

    /// Upload an image unless its edition cover is already stored.
    ///
    /// Ctrl-C cancels the in-flight call.
    #[tracing::instrument(skip(config, edition))]
    pub async fn put(
        config: SutraConfig,
        file: PathBuf,
        edition: EditionArgs,
        format: OutputFormat,
    ) -> SutraResult<()> {
        let store = open_store(config).await?;
        let asset = ImageAsset::from_path(&file);
        let metadata = edition.metadata();

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling upload");
                on_interrupt.cancel();
            }
        });

        let result = store
            .get_or_create_url_with_cancel(&asset, metadata.as_ref(), &cancel)
            .await;
        interrupt.abort();
        let url = result?;

        match format {
            OutputFormat::Human => println!("{}", url),
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "file": file.display().to_string(),
                    "url": url,
                });
                println!("{}", to_json(&value)?);
            }
        }
        Ok(())
    }

    /// Print the URL recorded for a fingerprint.
    #[tracing::instrument(skip(config))]
    pub async fn lookup(
        config: SutraConfig,
        fingerprint: String,
        format: OutputFormat,
    ) -> SutraResult<()> {
        let store = open_store(config).await?;
        let fingerprint = Fingerprint::new(fingerprint);
        let outcome = store.lookup_outcome(&fingerprint).await;

        match format {
            OutputFormat::Human => match &outcome {
                LookupOutcome::Hit(record) => {
                    println!("{}", record.url);
                    println!("Stored: {}", record.created_at.to_rfc3339());
                }
                LookupOutcome::Miss => println!("No image stored for {}", fingerprint),
                LookupOutcome::Failed(reason) => {
                    println!("Lookup failed for {}: {}", fingerprint, reason)
                }
            },
            OutputFormat::Json => {
                let value = match &outcome {
                    LookupOutcome::Hit(record) => serde_json::json!({
                        "status": "hit",
                        "record": record,
                    }),
                    LookupOutcome::Miss => serde_json::json!({
                        "status": "miss",
                        "fingerprint": fingerprint,
                    }),
                    LookupOutcome::Failed(reason) => serde_json::json!({
                        "status": "failed",
                        "fingerprint": fingerprint,
                        "error": reason,
                    }),
                };
                println!("{}", to_json(&value)?);
            }
        }
        Ok(())
    }
}

#[cfg(feature = "database")]
pub use database::{lookup, put};

#[cfg(not(feature = "database"))]
pub async fn put(
    _config: SutraConfig,
    _file: PathBuf,
    _edition: EditionArgs,
    _format: OutputFormat,
) -> SutraResult<()> {
    eprintln!("Error: Database feature not enabled. Rebuild with --features database");
    std::process::exit(1);
}

#[cfg(not(feature = "database"))]
pub async fn lookup(
    _config: SutraConfig,
    _fingerprint: String,
    _format: OutputFormat,
) -> SutraResult<()> {
    eprintln!("Error: Database feature not enabled. Rebuild with --features database");
    std::process::exit(1);
}
