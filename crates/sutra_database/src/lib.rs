//! PostgreSQL integration for Temple Book Sutra.
//!
//! This crate provides the diesel schema, row models and the
//! [`PostgresFingerprintIndex`] that persists fingerprint → URL records for
//! the image store.
//!
//! # Example
//!
//! ```rust,ignore
//! use sutra_database::PostgresFingerprintIndex;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads DATABASE_URL and applies pending migrations
//! let index = PostgresFingerprintIndex::connect(4)?;
//! # Ok(())
//! # }
//! ```

mod connection;
mod fingerprint_index;
mod models;

pub mod schema;

pub use connection::{PgPool, establish_connection, establish_pool, run_migrations};
pub use fingerprint_index::PostgresFingerprintIndex;
pub use models::{ImageRecordRow, NewImageRecordRow};

use sutra_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
