//! Core domain models and services for the gibi catalog mirror.
//!
//! The catalog pipeline mirrors five categories of an upstream comic
//! catalog into local storage, translating titles and descriptions to
//! Portuguese as they are first seen. Leaf crates provide the catalog
//! provider, the translator and the SQLite repositories; this crate owns
//! the domain model, the service traits at those seams and the sync
//! orchestration that ties them together.

pub mod catalog;
pub mod errors;
pub mod sync;
pub mod users;

pub use errors::{Error, Result};
