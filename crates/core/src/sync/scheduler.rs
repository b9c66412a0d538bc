//! Scheduling constants and the guarded hourly sync loop.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{SyncService, TickMetrics};

/// Default catalog sync cadence in seconds.
pub const SYNC_INTERVAL_SECS: u64 = 60 * 60;

/// Default confirmation-email sweep cadence in seconds.
pub const MAIL_SWEEP_INTERVAL_SECS: u64 = 60 * 60 * 24;

/// Shared runtime state for the sync loop. The cycle mutex is the
/// overlap guard: a trigger that fires while the previous tick is still
/// executing is skipped, never queued, so a slow tick cannot pile up
/// duplicate in-flight upserts against the same rows.
pub struct SyncRuntimeState {
    cycle_mutex: Mutex<()>,
}

impl SyncRuntimeState {
    pub fn new() -> Self {
        Self {
            cycle_mutex: Mutex::new(()),
        }
    }
}

impl Default for SyncRuntimeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one tick if no tick is currently in flight. Returns `None` when
/// the trigger was skipped.
pub async fn run_guarded_tick(
    service: &SyncService,
    state: &SyncRuntimeState,
) -> Option<TickMetrics> {
    match state.cycle_mutex.try_lock() {
        Ok(_guard) => Some(service.run_tick().await),
        Err(_) => {
            warn!("previous sync tick still running; skipping this trigger");
            None
        }
    }
}

/// Spawn the periodic sync loop. The first tick runs immediately so a
/// fresh deployment does not wait a full interval for its catalog.
pub fn spawn_sync_loop(
    service: Arc<SyncService>,
    state: Arc<SyncRuntimeState>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Some(metrics) = run_guarded_tick(&service, &state).await {
                info!(
                    "sync tick finished: status={} completed={} failed={} duration_ms={}",
                    metrics.status,
                    metrics.completed.len(),
                    metrics.failed.len(),
                    metrics.duration_ms
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogProvider, CatalogRecord, CatalogRepositoryTrait, Category, RawCatalogItem,
        TranslatedText, Translator,
    };
    use crate::errors::{TranslationError, UpstreamFetchError};
    use crate::sync::CategoryFormatter;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct EmptyProvider;

    #[async_trait]
    impl CatalogProvider for EmptyProvider {
        async fn fetch(
            &self,
            _category: Category,
        ) -> Result<Vec<RawCatalogItem>, UpstreamFetchError> {
            Ok(Vec::new())
        }
    }

    struct NullTranslator;

    #[async_trait]
    impl Translator for NullTranslator {
        async fn translate(
            &self,
            text: &str,
            _target_lang: &str,
        ) -> Result<String, TranslationError> {
            Ok(text.to_string())
        }
    }

    struct NullRepository;

    #[async_trait]
    impl CatalogRepositoryTrait for NullRepository {
        async fn upsert_batch(
            &self,
            _category: Category,
            records: Vec<CatalogRecord>,
        ) -> crate::Result<usize> {
            Ok(records.len())
        }

        async fn load_translated(
            &self,
            _category: Category,
        ) -> crate::Result<HashMap<i64, TranslatedText>> {
            Ok(HashMap::new())
        }
    }

    fn empty_service() -> SyncService {
        SyncService::new(
            Arc::new(EmptyProvider),
            Arc::new(NullRepository),
            CategoryFormatter::new(Arc::new(NullTranslator), "pt"),
        )
    }

    #[tokio::test]
    async fn overlapping_trigger_is_skipped() {
        let service = empty_service();
        let state = SyncRuntimeState::new();

        let held = state.cycle_mutex.lock().await;
        assert!(run_guarded_tick(&service, &state).await.is_none());
        drop(held);

        let metrics = run_guarded_tick(&service, &state).await.unwrap();
        assert_eq!(metrics.status, "ok");
    }
}
