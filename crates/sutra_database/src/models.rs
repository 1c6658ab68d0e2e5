//! Diesel row types for `image_records`.

use crate::schema::image_records;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sutra_core::{Fingerprint, ImageRecord, NewImageRecord};

/// A row read from `image_records`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = image_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ImageRecordRow {
    /// Unique key
    pub fingerprint: String,
    /// Public URL of the stored asset
    pub url: String,
    /// When the row was inserted
    pub created_at: DateTime<Utc>,
}

/// A row to insert into `image_records`.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = image_records)]
pub struct NewImageRecordRow {
    /// Unique key
    pub fingerprint: String,
    /// Public URL of the stored asset
    pub url: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<ImageRecordRow> for ImageRecord {
    fn from(row: ImageRecordRow) -> Self {
        ImageRecord {
            fingerprint: Fingerprint::new(row.fingerprint),
            url: row.url,
            created_at: row.created_at,
        }
    }
}

impl From<NewImageRecord> for NewImageRecordRow {
    fn from(record: NewImageRecord) -> Self {
        NewImageRecordRow {
            fingerprint: record.fingerprint.into_inner(),
            url: record.url,
            created_at: record.created_at,
        }
    }
}
