//! Storage error type and its mapping into the core taxonomy.

use thiserror::Error;

use gibi_core::errors::DatabaseError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("query failed: {0}")]
    Diesel(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("migration failed: {0}")]
    Migration(String),
}

impl From<StorageError> for gibi_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Diesel(e) => {
                gibi_core::Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::Pool(e) => {
                gibi_core::Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::Migration(msg) => {
                gibi_core::Error::Database(DatabaseError::MigrationFailed(msg))
            }
        }
    }
}
