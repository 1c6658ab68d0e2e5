//! Tests for the configuration system.

use std::io::Write;
use std::time::Duration;
use sutra_error::SutraErrorKind;
use sutra_images::{ImageStoreConfig, RecordMode, SutraConfig};

#[test]
fn test_load_bundled_defaults() {
    let config = SutraConfig::load().unwrap();

    assert_eq!(config.images.bucket, "book-images");
    assert_eq!(config.images.cache_control_secs, 3600);
    assert!(!config.images.upsert);
    assert_eq!(config.images.record_mode, RecordMode::Claim);
    assert_eq!(config.database.pool_size, 4);
}

#[test]
fn test_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[images]
bucket = "stall-covers"
record_mode = "detached"

[storage]
public_base_url = "https://cdn.temple.example"
"#
    )
    .unwrap();

    let config = SutraConfig::from_file(file.path()).unwrap();

    assert_eq!(config.images.bucket, "stall-covers");
    assert_eq!(config.images.record_mode, RecordMode::Detached);
    assert_eq!(config.images.call_timeout_ms, 30_000);
    assert_eq!(config.storage.public_base_url, "https://cdn.temple.example");
    assert_eq!(config.database.pool_size, 4);
}

#[test]
fn test_invalid_bucket_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[images]\nbucket = \"a/b\"").unwrap();

    let err = SutraConfig::from_file(file.path()).unwrap_err();
    match err.kind() {
        SutraErrorKind::Config(e) => assert_eq!(e.setting.as_deref(), Some("images.bucket")),
        other => panic!("expected config error, got {}", other),
    }
}

#[test]
fn test_missing_file_is_an_error() {
    let err = SutraConfig::from_file("/definitely/not/here/sutra.toml").unwrap_err();
    assert!(matches!(err.kind(), SutraErrorKind::Config(_)));
}

#[test]
fn test_upload_options_follow_config() {
    let config = ImageStoreConfig {
        cache_control_secs: 60,
        upsert: true,
        ..ImageStoreConfig::default()
    };

    let options = config.upload_options();
    assert_eq!(options.cache_control, Duration::from_secs(60));
    assert!(options.upsert);
}

#[test]
fn test_zero_timeout_is_rejected() {
    let config = ImageStoreConfig {
        call_timeout_ms: 0,
        ..ImageStoreConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("images.call_timeout_ms: must be positive"));
}
