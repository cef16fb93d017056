//! Derived views over canonical issue lists. Everything here is pure.

use std::collections::HashMap;

use bugboard_common::{AssigneeStat, ClosedIssue, Issue};
use chrono::{DateTime, Duration, Utc};

/// Partition issues by assignee. Buckets come out in first-seen order.
pub fn by_assignee(issues: &[Issue]) -> Vec<AssigneeStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<AssigneeStat> = Vec::new();

    for issue in issues {
        let slot = *index.entry(issue.assignee.as_str()).or_insert_with(|| {
            stats.push(AssigneeStat::new(issue.assignee.clone()));
            stats.len() - 1
        });
        stats[slot].push(issue.clone());
    }

    stats
}

/// Decides whether an issue counts as a regression.
pub trait RegressionPolicy: Send + Sync {
    fn is_regression(&self, issue: &Issue) -> bool;
}

/// Case-insensitive substring match of any keyword against the title or
/// any label. No scoring; a single hit includes the issue.
#[derive(Debug, Clone)]
pub struct KeywordPolicy {
    keywords: Vec<String>,
}

impl KeywordPolicy {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

impl Default for KeywordPolicy {
    fn default() -> Self {
        Self::new(["regression", "回归"])
    }
}

impl RegressionPolicy for KeywordPolicy {
    fn is_regression(&self, issue: &Issue) -> bool {
        issue.labels.iter().any(|label| self.matches(label)) || self.matches(&issue.title)
    }
}

pub fn regressions(issues: &[Issue], policy: &dyn RegressionPolicy) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| policy.is_regression(issue))
        .cloned()
        .collect()
}

/// Widest recently-closed window accepted, in days.
pub const MAX_CLOSED_DAYS: u32 = 3650;

/// `now - days * 24h`, saturating at the earliest representable instant.
pub fn closed_cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_hours(i64::from(days) * 24)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Keep only issues whose `closed_at` is at or after `cutoff`.
pub fn closed_since(issues: Vec<ClosedIssue>, cutoff: DateTime<Utc>) -> Vec<ClosedIssue> {
    issues
        .into_iter()
        .filter(|issue| issue.closed_at >= cutoff)
        .collect()
}
