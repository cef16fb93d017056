use bugboard_common::{ClosedIssue, Issue, IssueState};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::errors::FetchError;
use crate::github::client::IssueSource;
use crate::github::models::RawIssue;

/// Records per page requested from the remote listing.
pub const PAGE_SIZE: usize = 100;
/// Page ceiling for open-issue queries.
pub const OPEN_MAX_PAGES: u32 = 10;
/// Page ceiling for closed-issue queries.
pub const CLOSED_MAX_PAGES: u32 = 3;

/// Filters for the remote "list issues" endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueQuery {
    pub state: IssueState,
    pub labels: String,
    pub since: Option<DateTime<Utc>>,
    pub sort: Option<&'static str>,
    pub direction: Option<&'static str>,
}

impl IssueQuery {
    pub fn open(labels: impl Into<String>) -> Self {
        Self {
            state: IssueState::Open,
            labels: labels.into(),
            since: None,
            sort: None,
            direction: None,
        }
    }

    /// Closed issues *updated* since `since`, most recently updated first.
    pub fn closed_since(labels: impl Into<String>, since: DateTime<Utc>) -> Self {
        Self {
            state: IssueState::Closed,
            labels: labels.into(),
            since: Some(since),
            sort: Some("updated"),
            direction: Some("desc"),
        }
    }

    pub fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("state", self.state.as_str().to_string())];
        if !self.labels.is_empty() {
            params.push(("labels", self.labels.clone()));
        }
        if let Some(since) = self.since {
            params.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        params.push(("per_page", PAGE_SIZE.to_string()));
        params.push(("page", page.to_string()));
        if let Some(sort) = self.sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(direction) = self.direction {
            params.push(("direction", direction.to_string()));
        }
        params
    }
}

/// Walk pages 1..=`max_pages` sequentially, dropping pull requests.
///
/// Stops at the first page shorter than [`PAGE_SIZE`] (counted before the
/// pull-request filter) or at the ceiling. Any page failure aborts the whole
/// walk; no partial result is returned.
pub async fn fetch_issues(
    source: &dyn IssueSource,
    query: &IssueQuery,
    max_pages: u32,
) -> Result<Vec<RawIssue>, FetchError> {
    let max_pages = max_pages.max(1);
    let mut all = Vec::new();
    let mut page = 1u32;

    loop {
        let records = source.list_page(query, page).await?;
        let raw_len = records.len();
        let before = all.len();
        all.extend(records.into_iter().filter(|r| !r.is_pull_request()));
        debug!(
            state = %query.state,
            page,
            raw = raw_len,
            kept = all.len() - before,
            "fetched issue page"
        );

        if raw_len < PAGE_SIZE {
            break;
        }
        if page >= max_pages {
            warn!(state = %query.state, max_pages, "reached page ceiling, result may be truncated");
            break;
        }
        page += 1;
    }

    Ok(all)
}

/// All open issues carrying `label`, normalized.
pub async fn fetch_open_issues(source: &dyn IssueSource, label: &str) -> Result<Vec<Issue>, FetchError> {
    let raw = fetch_issues(source, &IssueQuery::open(label), OPEN_MAX_PAGES).await?;
    Ok(raw.into_iter().map(RawIssue::into_issue).collect())
}

/// Closed issues carrying `label` that were updated since `since`.
///
/// The remote filter matches on update time; callers still need to narrow
/// the result by `closed_at`.
pub async fn fetch_closed_since(
    source: &dyn IssueSource,
    label: &str,
    since: DateTime<Utc>,
) -> Result<Vec<ClosedIssue>, FetchError> {
    let query = IssueQuery::closed_since(label, since);
    let raw = fetch_issues(source, &query, CLOSED_MAX_PAGES).await?;
    Ok(raw.into_iter().filter_map(RawIssue::into_closed_issue).collect())
}
