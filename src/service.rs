//! The issue pipeline: aggregation views → cache → paginated fetcher.

use std::future::Future;
use std::sync::Arc;

use bugboard_common::{AssigneeStat, ClosedIssue, Issue};
use tracing::{info, warn};

use crate::aggregate::{self, KeywordPolicy, RegressionPolicy};
use crate::cache::{CacheKey, Clock, SystemClock, TtlCache};
use crate::config::{DashboardConfig, FailurePolicy};
use crate::errors::{FetchError, ServiceError};
use crate::github::client::{GitHubClient, IssueSource};
use crate::github::fetcher::{fetch_closed_since, fetch_open_issues};

/// Shared by every caller; cheap to put behind an `Arc`.
pub struct IssueService {
    source: Arc<dyn IssueSource>,
    clock: Arc<dyn Clock>,
    open_cache: TtlCache<Vec<Issue>>,
    closed_cache: TtlCache<Vec<ClosedIssue>>,
    policy: Arc<dyn RegressionPolicy>,
    label: String,
    failure_policy: FailurePolicy,
}

impl std::fmt::Debug for IssueService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueService")
            .field("label", &self.label)
            .field("failure_policy", &self.failure_policy)
            .field("open_cache", &self.open_cache)
            .field("closed_cache", &self.closed_cache)
            .finish()
    }
}

impl IssueService {
    /// Build a service that talks to GitHub with the given configuration.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, reqwest::Error> {
        let client = GitHubClient::new(config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn new(source: Arc<dyn IssueSource>, config: &DashboardConfig) -> Self {
        Self::with_clock(source, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn IssueSource>,
        config: &DashboardConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            open_cache: TtlCache::new(config.cache_ttl, Arc::clone(&clock)),
            closed_cache: TtlCache::new(config.cache_ttl, Arc::clone(&clock)),
            clock,
            policy: Arc::new(KeywordPolicy::default()),
            label: config.label.clone(),
            failure_policy: config.failure_policy,
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn RegressionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        self.open_cache.clear();
        self.closed_cache.clear();
    }

    /// Every open issue carrying the configured label.
    pub async fn open_issues(&self) -> Result<Arc<Vec<Issue>>, ServiceError> {
        self.cached(&self.open_cache, CacheKey::OpenIssues, || async {
            let issues = fetch_open_issues(self.source.as_ref(), &self.label).await?;
            info!(count = issues.len(), label = %self.label, "fetched open issues");
            Ok::<_, FetchError>(issues)
        })
        .await
    }

    pub async fn issues_by_assignee(&self) -> Result<Vec<AssigneeStat>, ServiceError> {
        let issues = self.open_issues().await?;
        Ok(aggregate::by_assignee(&issues))
    }

    pub async fn regression_issues(&self) -> Result<Vec<Issue>, ServiceError> {
        let issues = self.open_issues().await?;
        Ok(aggregate::regressions(&issues, self.policy.as_ref()))
    }

    /// Issues closed within the last `days` days.
    ///
    /// The remote query filters on update time, so the result is narrowed
    /// again locally on `closed_at`. `days` must lie in `1..=MAX_CLOSED_DAYS`.
    pub async fn recently_closed(&self, days: u32) -> Result<Arc<Vec<ClosedIssue>>, ServiceError> {
        if days == 0 || days > aggregate::MAX_CLOSED_DAYS {
            return Err(ServiceError::InvalidDays {
                days,
                max: aggregate::MAX_CLOSED_DAYS,
            });
        }
        self.cached(&self.closed_cache, CacheKey::ClosedIssues { days }, || async move {
            let cutoff = aggregate::closed_cutoff(self.clock.now(), days);
            let candidates = fetch_closed_since(self.source.as_ref(), &self.label, cutoff).await?;
            let fetched = candidates.len();
            let closed = aggregate::closed_since(candidates, cutoff);
            info!(days, fetched, count = closed.len(), "fetched recently closed issues");
            Ok::<_, FetchError>(closed)
        })
        .await
    }

    async fn cached<V, F, Fut>(
        &self,
        cache: &TtlCache<Vec<V>>,
        key: CacheKey,
        compute: F,
    ) -> Result<Arc<Vec<V>>, ServiceError>
    where
        V: Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<V>, FetchError>>,
    {
        let key = key.to_string();
        match self.failure_policy {
            FailurePolicy::Propagate => Ok(cache.get_or_try_compute(&key, compute).await?),
            FailurePolicy::Degrade => {
                let key_ref = key.as_str();
                let value = cache
                    .get_or_compute(&key, || async move {
                        match compute().await {
                            Ok(value) => value,
                            Err(e) => {
                                warn!(
                                    key = key_ref,
                                    reason = e.reason(),
                                    page = e.page(),
                                    error = %e,
                                    "fetch failed, serving empty list until the cache entry expires"
                                );
                                Vec::new()
                            }
                        }
                    })
                    .await;
                Ok(value)
            }
        }
    }
}
