//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use sutra_error::{DatabaseError, DatabaseErrorKind};

/// Connection pool used by the repository types in this crate.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn database_url() -> DatabaseResult<String> {
    std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })
}

/// Establish a connection to the PostgreSQL database.
///
/// Reads the `DATABASE_URL` environment variable to determine the connection string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> DatabaseResult<PgConnection> {
    let database_url = database_url()?;

    PgConnection::establish(&database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Build a connection pool of at most `pool_size` connections.
///
/// The pool is warmed by checking out one connection, so a bad
/// `DATABASE_URL` fails here rather than on the first lookup.
pub fn establish_pool(pool_size: u32) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url()?);
    let pool = Pool::builder()
        .max_size(pool_size)
        .build(manager)
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Connection(format!(
                "Failed to create connection pool: {}",
                e
            )))
        })?;

    {
        let _conn = pool.get().map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Connection(format!(
                "Failed to warm up connection pool: {}",
                e
            )))
        })?;
    }

    tracing::debug!(pool_size, "Database connection pool ready");
    Ok(pool)
}

/// Apply any pending embedded migrations.
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;

    for version in &applied {
        tracing::info!(%version, "Applied migration");
    }
    Ok(())
}
