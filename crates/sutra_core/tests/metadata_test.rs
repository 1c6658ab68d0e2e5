use sutra_core::{EditionMetadata, Fingerprint, NewImageRecord};

#[test]
fn empty_strings_count_as_empty_metadata() {
    let metadata = EditionMetadata::default()
        .with_author("")
        .with_title("")
        .with_printing_institute("");
    assert!(metadata.is_empty());
}

#[test]
fn any_non_empty_field_makes_metadata_non_empty() {
    let metadata = EditionMetadata::default().with_printing_institute("Gita Press");
    assert!(!metadata.is_empty());
    assert_eq!(metadata.joined(), "||Gita Press");
}

#[test]
fn joined_keeps_field_positions() {
    let author_only = EditionMetadata::default().with_author("A");
    let title_only = EditionMetadata::default().with_title("A");
    assert_ne!(author_only.joined(), title_only.joined());
}

#[test]
fn joined_escapes_delimiters_inside_fields() {
    let piped = EditionMetadata::default().with_author("A|B");
    let split = EditionMetadata::default().with_author("A").with_title("B|");
    let slashed = EditionMetadata::default().with_author("A\\").with_title("B");

    assert_eq!(piped.joined(), r"A\|B||");
    assert_eq!(split.joined(), r"A|B\||");
    assert_eq!(slashed.joined(), r"A\\|B|");
    assert_ne!(piped.joined(), split.joined());
    assert_ne!(piped.joined(), slashed.joined());
}

#[test]
fn metadata_deserializes_with_missing_fields() {
    let metadata: EditionMetadata = serde_json::from_str(r#"{"author":"A"}"#).unwrap();
    assert_eq!(metadata.author().as_deref(), Some("A"));
    assert_eq!(*metadata.title(), None);
}

#[test]
fn fingerprint_serializes_as_plain_string() {
    let fp = Fingerprint::new("abc=");
    assert_eq!(serde_json::to_string(&fp).unwrap(), r#""abc=""#);
}

#[test]
fn new_record_keeps_its_timestamp() {
    let record = NewImageRecord::now(Fingerprint::new("abc="), "https://cdn/x.jpg");
    let created_at = record.created_at;
    assert_eq!(record.into_record().created_at, created_at);
}
