use sutra_core::EditionMetadata;
use sutra_images::compute_fingerprint;

#[test]
fn fingerprint_is_deterministic() {
    let metadata = EditionMetadata::default()
        .with_author("Valmiki")
        .with_title("Ramayana")
        .with_printing_institute("Gita Press");

    assert_eq!(
        compute_fingerprint(b"cover bytes", Some(&metadata)),
        compute_fingerprint(b"cover bytes", Some(&metadata))
    );
}

#[test]
fn fingerprint_is_base64_sha256() {
    let fp = compute_fingerprint(b"cover.jpg", None);
    assert_eq!(fp.as_str().len(), 44);
    assert!(fp.as_str().ends_with('='));
}

#[test]
fn different_bytes_give_different_fingerprints() {
    assert_ne!(
        compute_fingerprint(b"cover one", None),
        compute_fingerprint(b"cover two", None)
    );
}

#[test]
fn edition_metadata_changes_fingerprint() {
    let b = EditionMetadata::default().with_author("A").with_title("B");
    let c = EditionMetadata::default().with_author("A").with_title("C");

    let f1 = compute_fingerprint(b"cover.jpg", Some(&b));
    let f2 = compute_fingerprint(b"cover.jpg", Some(&c));

    assert_eq!(f1.as_str(), "b5gZaLWY097WcruRS4RhhcdaSzvqCc5YP4dJ4vP/NOY=");
    assert_eq!(f2.as_str(), "sOGhkdGqqEhM0jbN8L6kTKE3VT+RGhvD7dk9BvQbecg=");
    assert_ne!(f1, f2);
}

#[test]
fn empty_metadata_is_ignored() {
    let empty = EditionMetadata::default().with_author("").with_title("");

    assert_eq!(
        compute_fingerprint(b"cover.jpg", Some(&empty)),
        compute_fingerprint(b"cover.jpg", None)
    );
    assert_eq!(
        compute_fingerprint(b"cover.jpg", None).as_str(),
        "CLEgtlcbpPWoyqVKbCAOuwWEetFNuyw+2JS/BNWlfsM="
    );
}

#[test]
fn metadata_on_empty_asset_still_counts() {
    let metadata = EditionMetadata::default().with_title("Untitled");
    assert_ne!(
        compute_fingerprint(b"", Some(&metadata)),
        compute_fingerprint(b"", None)
    );
}

#[test]
fn delimiter_inside_a_field_is_not_a_field_boundary() {
    let one_field = EditionMetadata::default().with_author("A|B");
    let two_fields = EditionMetadata::default().with_author("A").with_title("B|");
    let trailing_backslash = EditionMetadata::default().with_author("A\\").with_title("B");

    let fp_one = compute_fingerprint(b"cover.jpg", Some(&one_field));
    let fp_two = compute_fingerprint(b"cover.jpg", Some(&two_fields));
    let fp_backslash = compute_fingerprint(b"cover.jpg", Some(&trailing_backslash));

    assert_ne!(fp_one, fp_two);
    assert_ne!(fp_one, fp_backslash);
    assert_ne!(fp_two, fp_backslash);
}
