//! SQLite storage for the catalog mirror: five category tables plus
//! users, accessed through a pooled connection manager with a single
//! serialized write handle.

pub mod catalog;
pub mod db;
pub mod errors;
pub mod schema;
pub mod users;

pub use catalog::CatalogRepository;
pub use db::{create_pool, get_connection, run_migrations, DbPool, WriteHandle};
pub use errors::StorageError;
pub use users::UserRepository;
