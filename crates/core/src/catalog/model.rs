//! Catalog item models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw item as handed over by the catalog provider, already reduced
/// to the fields the pipeline cares about. `thumbnail_path` is the bare
/// image base path; the formatter appends the file extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCatalogItem {
    pub upstream_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_path: Option<String>,
}

/// Localized text already stored for an item. Keyed by upstream id in
/// the formatter's known-translation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedText {
    pub title_pt: String,
    pub description: String,
}

/// Normalized record produced by the formatter and consumed by the
/// category store within a single tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub upstream_id: i64,
    pub title_original: String,
    pub title_pt: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub is_translated: bool,
}

/// A stored catalog row. `created_at` is set once on first insert;
/// `last_update` is refreshed on every write, including translation
/// backfill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: i32,
    pub upstream_id: i64,
    pub title_original: String,
    pub title_pt: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub is_translated: bool,
    pub created_at: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
}
