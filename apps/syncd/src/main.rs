//! Gibi sync daemon.
//!
//! Mirrors the upstream comic catalog into local SQLite on an hourly
//! cadence and re-sends account confirmation emails once a day.

mod config;
mod mailer;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use gibi_catalog_api::MarvelCatalogClient;
use gibi_core::sync::{spawn_sync_loop, CategoryFormatter, SyncRuntimeState, SyncService};
use gibi_core::users::ConfirmationSweep;
use gibi_storage_sqlite::{
    create_pool, get_connection, run_migrations, CatalogRepository, UserRepository, WriteHandle,
};
use gibi_translate::GoogleTranslateClient;

use crate::config::Config;
use crate::mailer::RelayMailer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url)?;
    {
        let mut conn = get_connection(&pool)?;
        run_migrations(&mut conn)?;
    }
    let writer = WriteHandle::new(pool.clone());

    let provider = Arc::new(MarvelCatalogClient::new(
        config.marvel_api_url,
        config.marvel_public_key,
        config.marvel_private_key,
    ));
    let translator = Arc::new(GoogleTranslateClient::new(
        config.translate_api_url,
        config.translate_api_key,
    ));
    let repository = Arc::new(CatalogRepository::new(pool.clone(), writer.clone()));
    let formatter = CategoryFormatter::new(translator, config.target_lang);
    let service = Arc::new(SyncService::new(provider, repository, formatter));

    let state = Arc::new(SyncRuntimeState::new());
    info!(
        "catalog sync starting, interval {}s",
        config.sync_interval.as_secs()
    );
    let sync_task = spawn_sync_loop(service, state, config.sync_interval);

    let sweep_task = match config.mail_relay {
        Some(relay) => {
            let users = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
            let sweep = ConfirmationSweep::new(users, Arc::new(RelayMailer::new(relay)));
            info!(
                "confirmation sweep starting, interval {}s",
                config.mail_sweep_interval.as_secs()
            );
            Some(spawn_sweep_loop(sweep, config.mail_sweep_interval))
        }
        None => {
            info!("mail relay not configured; confirmation sweep disabled");
            None
        }
    };

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    sync_task.abort();
    if let Some(task) = sweep_task {
        task.abort();
    }
    Ok(())
}

/// Daily confirmation-email loop. Sweep errors are logged and the loop
/// keeps its cadence.
fn spawn_sweep_loop(sweep: ConfirmationSweep, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = sweep.run().await {
                error!("confirmation sweep failed: {e}");
            }
        }
    })
}
