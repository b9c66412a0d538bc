//! Per-tick sync orchestration across the five categories.

use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use serde::Serialize;

use crate::catalog::{CatalogProvider, CatalogRepositoryTrait, Category};
use crate::errors::Result;

use super::CategoryFormatter;

/// Counters for one category's cycle within a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySyncMetrics {
    pub category: Category,
    pub fetched: usize,
    pub already_translated: usize,
    pub upserted: usize,
}

/// Outcome of one scheduled tick.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickMetrics {
    pub completed: Vec<CategorySyncMetrics>,
    pub failed: Vec<Category>,
    pub duration_ms: i64,
    pub status: String,
}

/// Drives Fetch -> Format -> Persist for each category, one category at
/// a time, isolating failures per category. A failed category is simply
/// retried on the next tick; there is no in-tick retry.
pub struct SyncService {
    provider: Arc<dyn CatalogProvider>,
    repository: Arc<dyn CatalogRepositoryTrait>,
    formatter: CategoryFormatter,
}

impl SyncService {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        repository: Arc<dyn CatalogRepositoryTrait>,
        formatter: CategoryFormatter,
    ) -> Self {
        Self {
            provider,
            repository,
            formatter,
        }
    }

    /// Run one full tick over [`Category::ALL`]. Never returns an error:
    /// this is a background job with no caller awaiting a result, so
    /// failures are contained per category and observable only through
    /// logs and the returned metrics.
    pub async fn run_tick(&self) -> TickMetrics {
        let started = Instant::now();
        let mut completed = Vec::new();
        let mut failed = Vec::new();

        for category in Category::ALL {
            match self.sync_category(category).await {
                Ok(metrics) => {
                    info!(
                        "{category}: synced {} items ({} already translated, {} upserted)",
                        metrics.fetched, metrics.already_translated, metrics.upserted
                    );
                    completed.push(metrics);
                }
                Err(e) => {
                    error!("{category}: sync cycle failed, retrying on the next tick: {e}");
                    failed.push(category);
                }
            }
        }

        let status = if failed.is_empty() { "ok" } else { "partial" };
        TickMetrics {
            completed,
            failed,
            duration_ms: started.elapsed().as_millis() as i64,
            status: status.to_string(),
        }
    }

    async fn sync_category(&self, category: Category) -> Result<CategorySyncMetrics> {
        let raw_items = self.provider.fetch(category).await?;
        let known = self.repository.load_translated(category).await?;

        let fetched = raw_items.len();
        let already_translated = raw_items
            .iter()
            .filter(|item| known.contains_key(&item.upstream_id))
            .count();

        let records = self.formatter.normalize(category, raw_items, &known).await;
        let upserted = self.repository.upsert_batch(category, records).await?;

        Ok(CategorySyncMetrics {
            category,
            fetched,
            already_translated,
            upserted,
        })
    }
}
