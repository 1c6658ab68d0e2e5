use sutra_core::{Fingerprint, FingerprintIndex, NewImageRecord};
use sutra_error::SutraErrorKind;
use sutra_images::MemoryFingerprintIndex;

#[tokio::test]
async fn find_returns_inserted_record() {
    let index = MemoryFingerprintIndex::new();
    let fp = Fingerprint::new("abc=");

    assert!(index.find(&fp).await.unwrap().is_none());
    index
        .insert(NewImageRecord::now(fp.clone(), "https://cdn.test/a.jpg"))
        .await
        .unwrap();

    let record = index.find(&fp).await.unwrap().unwrap();
    assert_eq!(record.url, "https://cdn.test/a.jpg");
}

#[tokio::test]
async fn insert_rejects_duplicate_fingerprint() {
    let index = MemoryFingerprintIndex::new();
    let fp = Fingerprint::new("abc=");

    index
        .insert(NewImageRecord::now(fp.clone(), "https://cdn.test/a.jpg"))
        .await
        .unwrap();
    let err = index
        .insert(NewImageRecord::now(fp.clone(), "https://cdn.test/b.jpg"))
        .await
        .unwrap_err();

    match err.kind() {
        SutraErrorKind::Backend(e) => assert_eq!(e.backend, Some("memory index")),
        other => panic!("expected backend error, got {}", other),
    }
    assert_eq!(index.len().await, 1);
    assert_eq!(
        index.find(&fp).await.unwrap().unwrap().url,
        "https://cdn.test/a.jpg"
    );
}

#[tokio::test]
async fn claim_keeps_first_record() {
    let index = MemoryFingerprintIndex::new();
    let fp = Fingerprint::new("abc=");

    let first = index
        .claim(NewImageRecord::now(fp.clone(), "https://cdn.test/a.jpg"))
        .await
        .unwrap();
    let second = index
        .claim(NewImageRecord::now(fp.clone(), "https://cdn.test/b.jpg"))
        .await
        .unwrap();

    assert_eq!(first.url, "https://cdn.test/a.jpg");
    assert_eq!(second, first);
    assert_eq!(index.len().await, 1);
}
