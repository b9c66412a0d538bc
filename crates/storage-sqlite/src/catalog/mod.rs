//! SQLite persistence for the five mirrored category tables.

mod model;
mod repository;

pub use model::CatalogRowDB;
pub use repository::CatalogRepository;
