use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

pub const DEFAULT_REPO: &str = "matrixorigin/matrixone";
pub const DEFAULT_LABEL: &str = "kind/bug";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Value shipped in the sample `.env`; never sent as a credential.
pub const TOKEN_PLACEHOLDER: &str = "your_github_token_here";

/// A GitHub `owner/repo` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = ConfigError;

    /// Accepts `owner/repo`, `https://github.com/owner/repo[.git]`,
    /// token-embedded HTTPS URLs and `git@github.com:owner/repo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepo {
            value: s.to_string(),
        };
        let trimmed = s.trim().trim_end_matches('/').trim_end_matches(".git");

        let path = if let Some(pos) = trimmed.find("github.com/") {
            &trimmed[pos + "github.com/".len()..]
        } else if let Some(rest) = trimmed.strip_prefix("git@github.com:") {
            rest
        } else if trimmed.contains("://") {
            return Err(invalid());
        } else {
            trimmed
        };

        let parts: Vec<&str> = path.split('/').collect();
        match parts.as_slice() {
            [owner, name]
                if !owner.is_empty()
                    && !name.is_empty()
                    && !owner.contains(':')
                    && !owner.contains('.')
                    && !path.contains(char::is_whitespace) =>
            {
                Ok(Self::new(*owner, *name))
            }
            _ => Err(invalid()),
        }
    }
}

/// What the issue service does when a remote fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Log the failure, answer with an empty list and cache it for the TTL.
    #[default]
    Degrade,
    /// Return the failure to the caller and cache nothing.
    Propagate,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrade => f.write_str("degrade"),
            Self::Propagate => f.write_str("propagate"),
        }
    }
}

/// Everything the issue pipeline needs from the outside world.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub repo: RepoSlug,
    pub token: Option<String>,
    pub label: String,
    pub api_base: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            repo: RepoSlug::new("matrixorigin", "matrixone"),
            token: None,
            label: DEFAULT_LABEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl DashboardConfig {
    /// The token to send, if any. Blank values and the placeholder are ignored.
    pub fn effective_token(&self) -> Option<&str> {
        usable_token(self.token.as_deref())
    }
}

pub fn usable_token(token: Option<&str>) -> Option<&str> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != TOKEN_PLACEHOLDER)
}
