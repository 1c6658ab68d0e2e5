//! Error types for the Temple Book Sutra image store.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use sutra_error::{ImageError, ImageErrorKind, SutraResult};
//!
//! fn read_cover() -> SutraResult<Vec<u8>> {
//!     Err(ImageError::new(ImageErrorKind::Read("cover.jpg: permission denied".to_string())))?
//! }
//!
//! assert!(read_cover().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod image;
mod storage;

pub use backend::BackendError;
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{SutraError, SutraErrorKind, SutraResult};
pub use image::{ImageError, ImageErrorKind, Operation};
pub use storage::{StorageError, StorageErrorKind};
