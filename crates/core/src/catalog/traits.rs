//! Service traits at the pipeline's external seams.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::{Result, TranslationError, UpstreamFetchError};

use super::{CatalogRecord, Category, RawCatalogItem, TranslatedText};

/// Upstream catalog source. Implementations must exhaust upstream
/// pagination before returning: the pipeline assumes full-catalog
/// coverage per cycle, not a partial page.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch(&self, category: Category) -> std::result::Result<Vec<RawCatalogItem>, UpstreamFetchError>;
}

/// Single-string remote translation. Billed per call; implementations
/// perform no internal retry, the hourly cycle is the retry loop.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
    ) -> std::result::Result<String, TranslationError>;
}

/// Persistence for the five category tables, one parameterized code
/// path keyed on [`Category`].
#[async_trait]
pub trait CatalogRepositoryTrait: Send + Sync {
    /// Insert-or-update each record by `upstream_id`. Returns the number
    /// of rows applied; rows that fail to persist are logged and skipped
    /// so the rest of the batch still lands.
    async fn upsert_batch(&self, category: Category, records: Vec<CatalogRecord>) -> Result<usize>;

    /// Localized text for every row already marked translated, keyed by
    /// upstream id. Feeds the formatter's skip-translation lookup.
    async fn load_translated(&self, category: Category) -> Result<HashMap<i64, TranslatedText>>;
}
