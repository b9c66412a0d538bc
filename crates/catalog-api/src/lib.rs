//! Marvel Comics API catalog provider.
//!
//! Fetches per-category listings from the upstream catalog, exhausting
//! pagination so every cycle sees the full catalog snapshot.
//! Authentication uses the documented `ts`/`apikey`/`hash` query
//! parameters with `hash = md5(ts + private_key + public_key)`.

mod client;

pub use client::{MarvelCatalogClient, DEFAULT_BASE_URL, PAGE_LIMIT};
