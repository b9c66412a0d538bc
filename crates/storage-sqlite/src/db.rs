//! Connection pool, embedded migrations and the serialized write handle.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::sync::Mutex;

use gibi_core::errors::{DatabaseError, Error, Result};

use crate::errors::StorageError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub fn create_pool(database_url: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(8)
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(())
}

/// Timestamps are stored as RFC3339 text with a fixed precision so the
/// column stays lexicographically ordered.
pub fn to_db_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn from_db_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "invalid stored timestamp '{text}': {e}"
            )))
        })
}

/// Funnels all mutations through one async lock and a blocking task, so
/// writes that target the same row are serialized and never race on the
/// pool.
#[derive(Clone)]
pub struct WriteHandle {
    pool: Arc<DbPool>,
    write_lock: Arc<Mutex<()>>,
}

impl WriteHandle {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn exec<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection(&pool)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!("write task failed: {e}")))
        })?
    }
}
