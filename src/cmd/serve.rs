//! Dashboard API server command (`bugboard serve`).

use std::sync::Arc;

use anyhow::{Context, Result};
use bugboard::IssueService;
use bugboard::config::DashboardConfig;
use bugboard::dashboard::server::{ServerConfig, start_server};
use bugboard::github::GitHubClient;
use tracing::{info, warn};

pub async fn cmd_serve(config: &DashboardConfig, server: ServerConfig) -> Result<()> {
    let client = GitHubClient::new(config).context("Failed to build GitHub client")?;
    if !client.is_authenticated() {
        warn!("no GitHub token configured, requests are subject to the unauthenticated rate limit");
    }
    info!(
        issues_url = %client.issues_url(),
        label = %config.label,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        failure_policy = %config.failure_policy,
        "issue service initialized"
    );

    let service = IssueService::new(Arc::new(client), config);
    start_server(server, service).await
}
