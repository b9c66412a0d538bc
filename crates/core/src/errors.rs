//! Error taxonomy shared across the workspace.
//!
//! Failures are contained at the smallest scope that can absorb them:
//! a translation failure degrades one item, a fetch failure aborts one
//! category's cycle, and nothing propagates out of the scheduler task.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for core services.
#[derive(Debug, Error)]
pub enum Error {
    #[error("upstream catalog error: {0}")]
    Fetch(#[from] UpstreamFetchError),

    #[error("translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("mail error: {0}")]
    Mail(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures reaching the upstream catalog API. Aborts the current
/// category's cycle only; the category is retried on the next tick.
#[derive(Debug, Error)]
pub enum UpstreamFetchError {
    /// Network-level failure (connect, timeout, TLS).
    #[error("catalog API unreachable: {0}")]
    Network(String),

    /// The API rejected our credentials.
    #[error("catalog API rejected credentials (HTTP {status})")]
    Auth { status: u16 },

    /// Non-auth error response from the API.
    #[error("catalog API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected wire format.
    #[error("malformed catalog response: {0}")]
    Decode(String),
}

/// Failures from the remote translation service. Degrades the single
/// affected item to untranslated; never aborts a batch or a category.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Network-level failure.
    #[error("translation API unreachable: {0}")]
    Network(String),

    /// Per-call billing quota exhausted or rate limit hit.
    #[error("translation quota exhausted (HTTP {status})")]
    Quota { status: u16 },

    /// Other error response from the API.
    #[error("translation API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected wire format.
    #[error("malformed translation response: {0}")]
    Decode(String),
}

/// Retry policy classification for translation failures. There is no
/// in-process retry; the hourly cycle is the retry loop, so this only
/// informs logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    Retryable,
    Permanent,
}

impl TranslationError {
    /// Create an API error from status and message, mapping quota
    /// statuses to their dedicated variant.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        match status {
            403 | 429 => Self::Quota { status },
            _ => Self::Api {
                status,
                message: message.into(),
            },
        }
    }

    /// HTTP status if the remote service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Quota { status } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify the failure for the next-tick retry.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Network(_) | Self::Quota { .. } => RetryClass::Retryable,
            Self::Api { status, .. } if (500..=599).contains(status) => RetryClass::Retryable,
            Self::Api { .. } | Self::Decode(_) => RetryClass::Permanent,
        }
    }
}

/// Storage-level failures surfaced to core services. The storage crate
/// maps its diesel/pool errors into these variants.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to get connection: {0}")]
    ConnectionFailed(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("migration failed: {0}")]
    MigrationFailed(String),
}
