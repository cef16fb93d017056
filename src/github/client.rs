use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;

use crate::config::{DashboardConfig, RepoSlug};
use crate::errors::FetchError;
use crate::github::fetcher::IssueQuery;
use crate::github::models::RawIssue;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("bugboard/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY_CHARS: usize = 500;

/// One page of the remote "list issues" endpoint.
/// Real implementation: `GitHubClient`. Test doubles live next to the fetcher tests.
#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn list_page(&self, query: &IssueQuery, page: u32) -> Result<Vec<RawIssue>, FetchError>;
}

/// reqwest-backed client for `GET /repos/{owner}/{repo}/issues`.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    repo: RepoSlug,
    token: Option<String>,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("repo", &self.repo)
            .field("token_set", &self.token.is_some())
            .finish()
    }
}

impl GitHubClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            repo: config.repo.clone(),
            token: config.effective_token().map(str::to_string),
        })
    }

    pub fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.base_url,
            self.repo.owner(),
            self.repo.name()
        )
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn list_page(&self, query: &IssueQuery, page: u32) -> Result<Vec<RawIssue>, FetchError> {
        let mut request = self
            .http
            .get(self.issues_url())
            .header(ACCEPT, GITHUB_ACCEPT)
            .query(&query.params(page));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|source| FetchError::Network { page, source })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Auth {
                page,
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                page,
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Network { page, source })?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
            page,
            message: e.to_string(),
        })
    }
}
