//! PostgreSQL-backed fingerprint index.

use crate::DatabaseResult;
use crate::connection::{PgPool, establish_pool, run_migrations};
use crate::models::{ImageRecordRow, NewImageRecordRow};
use crate::schema::image_records;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use sutra_core::{Fingerprint, FingerprintIndex, ImageRecord, NewImageRecord};
use sutra_error::{DatabaseError, DatabaseErrorKind, SutraResult};
use tracing::{debug, info, instrument};

/// Fingerprint index stored in the `image_records` table.
///
/// The fingerprint column is the primary key, so the table itself enforces
/// one record per fingerprint. [`claim`](FingerprintIndex::claim) uses
/// `INSERT ... ON CONFLICT DO NOTHING` followed by a read of the surviving
/// row in the same transaction.
#[derive(Clone)]
pub struct PostgresFingerprintIndex {
    pool: PgPool,
}

impl PostgresFingerprintIndex {
    /// Create an index over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using `DATABASE_URL` and apply pending migrations.
    pub fn connect(pool_size: u32) -> DatabaseResult<Self> {
        let pool = establish_pool(pool_size)?;
        {
            let mut conn = checkout(&pool)?;
            run_migrations(&mut conn)?;
        }
        Ok(Self::new(pool))
    }

    /// Run a blocking database closure on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> DatabaseResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }
}

fn checkout(pool: &PgPool) -> DatabaseResult<PooledConnection<ConnectionManager<PgConnection>>> {
    pool.get()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

#[async_trait]
impl FingerprintIndex for PostgresFingerprintIndex {
    #[instrument(skip(self, fingerprint), fields(fingerprint = %fingerprint))]
    async fn find(&self, fingerprint: &Fingerprint) -> SutraResult<Option<ImageRecord>> {
        let key = fingerprint.as_str().to_string();

        let row = self
            .with_conn(move |conn| {
                image_records::table
                    .find(key)
                    .select(ImageRecordRow::as_select())
                    .first::<ImageRecordRow>(conn)
                    .optional()
                    .map_err(DatabaseError::from)
            })
            .await?;

        debug!(found = row.is_some(), "Fingerprint lookup");
        Ok(row.map(ImageRecord::from))
    }

    #[instrument(skip(self, record), fields(fingerprint = %record.fingerprint))]
    async fn insert(&self, record: NewImageRecord) -> SutraResult<()> {
        let row = NewImageRecordRow::from(record);

        self.with_conn(move |conn| {
            diesel::insert_into(image_records::table)
                .values(&row)
                .execute(conn)
                .map_err(DatabaseError::from)
        })
        .await?;

        info!("Recorded image fingerprint");
        Ok(())
    }

    #[instrument(skip(self, record), fields(fingerprint = %record.fingerprint))]
    async fn claim(&self, record: NewImageRecord) -> SutraResult<ImageRecord> {
        let row = NewImageRecordRow::from(record);

        let (inserted, winner) = self
            .with_conn(move |conn| {
                conn.transaction::<_, DatabaseError, _>(|conn| {
                    let inserted = diesel::insert_into(image_records::table)
                        .values(&row)
                        .on_conflict(image_records::fingerprint)
                        .do_nothing()
                        .execute(conn)?;

                    let winner = image_records::table
                        .find(row.fingerprint.as_str())
                        .select(ImageRecordRow::as_select())
                        .first::<ImageRecordRow>(conn)?;

                    Ok((inserted, winner))
                })
            })
            .await?;

        if inserted == 1 {
            info!("Claimed image fingerprint");
        } else {
            debug!(url = %winner.url, "Fingerprint already claimed");
        }
        Ok(winner.into())
    }
}
