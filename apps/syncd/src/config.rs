//! Environment-driven daemon configuration.
//!
//! Credentials are never compiled in. The required keys are read at
//! startup and the process refuses to boot without them; everything
//! else has a sensible default.

use std::time::Duration;

use anyhow::{anyhow, Result};
use gibi_core::sync::{MAIL_SWEEP_INTERVAL_SECS, SYNC_INTERVAL_SECS};

/// Mail relay settings. Absent when the relay is not configured, in
/// which case the confirmation sweep stays disabled.
#[derive(Debug, Clone)]
pub struct MailRelayConfig {
    pub relay_url: String,
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub marvel_api_url: String,
    pub marvel_public_key: String,
    pub marvel_private_key: String,
    pub translate_api_url: String,
    pub translate_api_key: String,
    pub target_lang: String,
    pub sync_interval: Duration,
    pub mail_sweep_interval: Duration,
    pub mail_relay: Option<MailRelayConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mail_relay = match (env_trimmed("MAIL_RELAY_URL"), env_trimmed("MAIL_FROM")) {
            (Some(relay_url), Some(from_address)) => Some(MailRelayConfig {
                relay_url,
                from_address,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(anyhow!("MAIL_RELAY_URL is set but MAIL_FROM is missing"))
            }
            (None, Some(_)) => {
                return Err(anyhow!("MAIL_FROM is set but MAIL_RELAY_URL is missing"))
            }
        };

        Ok(Self {
            database_url: env_trimmed("DATABASE_URL").unwrap_or_else(|| "gibi.db".to_string()),
            marvel_api_url: env_trimmed("MARVEL_API_URL")
                .unwrap_or_else(|| gibi_catalog_api::DEFAULT_BASE_URL.to_string()),
            marvel_public_key: env_required("MARVEL_PUBLIC_KEY")?,
            marvel_private_key: env_required("MARVEL_PRIVATE_KEY")?,
            translate_api_url: env_trimmed("GOOGLE_TRANSLATE_API_URL")
                .unwrap_or_else(|| gibi_translate::DEFAULT_API_URL.to_string()),
            translate_api_key: env_required("GOOGLE_TRANSLATE_API_KEY")?,
            target_lang: env_trimmed("TARGET_LANG").unwrap_or_else(|| "pt".to_string()),
            sync_interval: Duration::from_secs(
                env_seconds("SYNC_INTERVAL_SECS")?.unwrap_or(SYNC_INTERVAL_SECS),
            ),
            mail_sweep_interval: Duration::from_secs(
                env_seconds("MAIL_SWEEP_INTERVAL_SECS")?.unwrap_or(MAIL_SWEEP_INTERVAL_SECS),
            ),
            mail_relay,
        })
    }
}

/// Read an env var, treating blank values the same as unset ones.
fn env_trimmed(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_required(key: &str) -> Result<String> {
    env_trimmed(key).ok_or_else(|| anyhow!("{key} must be set"))
}

fn env_seconds(key: &str) -> Result<Option<u64>> {
    match env_trimmed(key) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| anyhow!("{key} must be a whole number of seconds, got {raw:?}")),
    }
}
