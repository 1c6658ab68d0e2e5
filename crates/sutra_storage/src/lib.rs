//! Object storage for Temple Book Sutra cover images.
//!
//! This crate provides the blob half of the image store: a pluggable
//! [`ObjectStore`] that uploads bytes under a caller-chosen name and hands
//! back a stable public URL. The fingerprint → URL mapping lives elsewhere
//! (see `sutra_core::FingerprintIndex`).
//!
//! # Example
//!
//! ```rust
//! use sutra_storage::{FileSystemObjectStore, ObjectName, ObjectStore, UploadOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemObjectStore::new("/tmp/sutra", "https://cdn.example.org/storage")?;
//! let name = ObjectName::generate("cover page.jpg");
//!
//! store
//!     .upload("book-images", name.as_str(), b"jpeg bytes", &UploadOptions::default())
//!     .await?;
//!
//! let url = store.public_url("book-images", name.as_str());
//! assert!(url.starts_with("https://cdn.example.org/storage/book-images/"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod object_name;
mod options;
mod store;

pub use filesystem::FileSystemObjectStore;
pub use object_name::{MAX_SANITIZED_LEN, ObjectName, sanitize_file_name};
pub use options::UploadOptions;
pub use store::ObjectStore;
pub use sutra_error::{StorageError, StorageErrorKind};
