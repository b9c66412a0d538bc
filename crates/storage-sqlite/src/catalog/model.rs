//! Row types for the dynamic category-table queries.
//!
//! The five category tables share one shape and are addressed by name
//! through `Category::table_name()`, so rows come back through
//! `sql_query` rather than the typed schema DSL.

use diesel::QueryableByName;

use gibi_core::catalog::CatalogItem;
use gibi_core::Result;

use crate::db::from_db_timestamp;

/// A full catalog row, as stored.
#[derive(Debug, Clone, QueryableByName)]
pub struct CatalogRowDB {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub id: i32,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub upstream_id: i64,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title_original: String,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub title_pt: Option<String>,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub thumbnail: Option<String>,
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub is_translated: bool,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub created_at: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub last_update: String,
}

impl CatalogRowDB {
    pub fn into_domain(self) -> Result<CatalogItem> {
        Ok(CatalogItem {
            id: self.id,
            upstream_id: self.upstream_id,
            title_original: self.title_original,
            title_pt: self.title_pt,
            description: self.description,
            thumbnail: self.thumbnail,
            is_translated: self.is_translated,
            created_at: from_db_timestamp(&self.created_at)?,
            last_update: from_db_timestamp(&self.last_update)?,
        })
    }
}

/// Projection used by the formatter's skip-translation lookup.
#[derive(Debug, QueryableByName)]
pub(crate) struct TranslatedRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub upstream_id: i64,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title_pt: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
}
