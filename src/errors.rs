//! Typed error hierarchy for bugboard.
//!
//! Three enums cover the three layers:
//! - `FetchError`: remote issue tracker failures (transport, auth, status, decode)
//! - `ConfigError`: unusable static configuration, reported at startup
//! - `ServiceError`: what an aggregation caller can observe

use thiserror::Error;

/// Errors from a paginated fetch against the remote issue tracker.
///
/// Any of these aborts the whole fetch; no partial page set is returned.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error requesting page {page}: {source}")]
    Network {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("GitHub rejected the credential (HTTP {status}) on page {page}")]
    Auth { page: u32, status: u16 },

    #[error("GitHub returned HTTP {status} for page {page}: {body}")]
    Status { page: u32, status: u16, body: String },

    #[error("Failed to decode page {page}: {message}")]
    Decode { page: u32, message: String },
}

impl FetchError {
    /// The page number that was being requested when the fetch failed.
    pub fn page(&self) -> u32 {
        match self {
            Self::Network { page, .. }
            | Self::Auth { page, .. }
            | Self::Status { page, .. }
            | Self::Decode { page, .. } => *page,
        }
    }

    /// Short machine-friendly reason, used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Auth { .. } => "auth",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
        }
    }
}

/// Errors from parsing static configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid repository '{value}': expected 'owner/repo' or a github.com URL")]
    InvalidRepo { value: String },
}

/// Errors surfaced by the issue service to its callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to fetch issues from GitHub: {0}")]
    Fetch(#[from] FetchError),

    #[error("Day window must be between 1 and {max}, got {days}")]
    InvalidDays { days: u32, max: u32 },
}
