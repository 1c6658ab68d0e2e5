//! Edition metadata attached to an uploaded cover image.

use serde::{Deserialize, Serialize};

/// Delimiter placed between the asset content and each metadata field when
/// the fingerprint input is assembled.
pub const METADATA_DELIMITER: &str = "|";

/// Textual metadata identifying a book edition.
///
/// The same cover scanned for two editions (different printing institute,
/// corrected title) must produce two different fingerprints, so these
/// fields are folded into the fingerprint alongside the image bytes.
///
/// # Examples
///
/// ```
/// use sutra_core::EditionMetadata;
///
/// let metadata = EditionMetadata::default()
///     .with_author("Vyasa")
///     .with_title("Bhagavad Gita");
///
/// assert!(!metadata.is_empty());
/// assert_eq!(metadata.joined(), "Vyasa|Bhagavad Gita|");
/// assert!(EditionMetadata::default().is_empty());
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct EditionMetadata {
    /// Book author
    #[serde(default)]
    author: Option<String>,
    /// Book title
    #[serde(default)]
    title: Option<String>,
    /// Institute that printed this edition
    #[serde(default)]
    printing_institute: Option<String>,
}

impl EditionMetadata {
    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the printing institute.
    pub fn with_printing_institute(mut self, institute: impl Into<String>) -> Self {
        self.printing_institute = Some(institute.into());
        self
    }

    /// True when every field is missing or empty.
    pub fn is_empty(&self) -> bool {
        [&self.author, &self.title, &self.printing_institute]
            .into_iter()
            .all(|field| field.as_deref().is_none_or(str::is_empty))
    }

    /// The fields in fingerprint order, joined by [`METADATA_DELIMITER`].
    ///
    /// Missing fields contribute an empty string so that field positions are
    /// stable. Backslashes and delimiters inside a field are escaped with a
    /// backslash, so distinct metadata never joins to the same text.
    ///
    /// ```
    /// use sutra_core::EditionMetadata;
    ///
    /// let metadata = EditionMetadata::default().with_author("A|B");
    /// assert_eq!(metadata.joined(), r"A\|B||");
    /// ```
    pub fn joined(&self) -> String {
        [&self.author, &self.title, &self.printing_institute]
            .into_iter()
            .map(|field| escape_field(field.as_deref().unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(METADATA_DELIMITER)
    }
}

fn escape_field(field: &str) -> String {
    let mut escaped = String::with_capacity(field.len());
    for c in field.chars() {
        if c == '\\' || METADATA_DELIMITER.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
