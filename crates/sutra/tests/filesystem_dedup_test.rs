use std::sync::Arc;
use sutra::{
    EditionMetadata, FileSystemObjectStore, ImageAsset, ImageStore, ImageStoreConfig,
    MemoryFingerprintIndex, ObjectStore, compute_fingerprint,
};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> (Arc<FileSystemObjectStore>, ImageStore) {
    let objects = Arc::new(
        FileSystemObjectStore::new(dir.path().join("storage"), "https://stall.example/storage/")
            .unwrap(),
    );
    let store = ImageStore::new(
        objects.clone(),
        Arc::new(MemoryFingerprintIndex::new()),
        ImageStoreConfig::default(),
    );
    (objects, store)
}

fn bucket_entries(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path().join("storage").join("book-images"))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_cover_file_is_written_once() {
    let dir = TempDir::new().unwrap();
    let cover = dir.path().join("Gita Cover (1).jpg");
    std::fs::write(&cover, b"jpeg bytes").unwrap();
    let (objects, store) = store_in(&dir);
    let metadata = EditionMetadata::default()
        .with_author("Vyasa")
        .with_title("Bhagavad Gita");
    let asset = ImageAsset::from_path(&cover);

    let first = store
        .get_or_create_url(&asset, Some(&metadata))
        .await
        .unwrap();
    let second = store
        .get_or_create_url(&asset, Some(&metadata))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with("https://stall.example/storage/book-images/"));
    assert!(first.ends_with("_Gita_Cover__1_.jpg"));
    assert_eq!(bucket_entries(&dir), 1);

    let name = first.rsplit('/').next().unwrap();
    assert!(objects.exists("book-images", name).await.unwrap());
}

#[tokio::test]
async fn test_new_edition_gets_its_own_object() {
    let dir = TempDir::new().unwrap();
    let (_objects, store) = store_in(&dir);
    let bytes = b"same scan".to_vec();
    let first_printing = EditionMetadata::default().with_printing_institute("Gita Press");
    let second_printing = EditionMetadata::default().with_printing_institute("Nirnaya Sagar");

    let a = store
        .get_or_create_url(
            &ImageAsset::from_bytes("cover.jpg", bytes.clone()),
            Some(&first_printing),
        )
        .await
        .unwrap();
    let b = store
        .get_or_create_url(
            &ImageAsset::from_bytes("cover.jpg", bytes.clone()),
            Some(&second_printing),
        )
        .await
        .unwrap();

    assert_ne!(a, b);
    assert_ne!(
        compute_fingerprint(&bytes, Some(&first_printing)),
        compute_fingerprint(&bytes, Some(&second_printing))
    );
    assert_eq!(bucket_entries(&dir), 2);
}

#[tokio::test]
async fn test_long_cover_name_is_stored() {
    let dir = TempDir::new().unwrap();
    let (_objects, store) = store_in(&dir);
    let file_name = format!("{}.jpg", "a".repeat(220));

    let url = store
        .get_or_create_url(&ImageAsset::from_bytes(file_name, b"scan".to_vec()), None)
        .await
        .unwrap();

    assert!(url.ends_with("a.jpg"));
    assert_eq!(bucket_entries(&dir), 1);
}
