//! Shared domain types for the bugboard dashboard.
//!
//! These are the JSON shapes the dashboard frontend consumes. Field names
//! are camelCase on the wire (`createdAt`, `closedBy`, ...).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Assignee value used when the remote record has no assignee.
pub const UNASSIGNED: &str = "unassigned";

/// Closer value used when the remote record does not say who closed it.
pub const UNKNOWN_CLOSER: &str = "unknown";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Invalid issue state: {}", s)),
        }
    }
}

/// Canonical issue shape, normalized from a remote tracker record.
///
/// Pull requests never become an `Issue`; they are dropped at fetch time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    /// Login of the assignee, or [`UNASSIGNED`].
    pub assignee: String,
    /// Label names in source order.
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub url: String,
    pub state: IssueState,
}

/// An issue that was closed inside a requested day window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClosedIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub assignee: String,
    /// Login of whoever closed the issue, or [`UNKNOWN_CLOSER`].
    pub closed_by: String,
    pub labels: Vec<String>,
    pub closed_at: DateTime<Utc>,
    pub url: String,
}

/// Open issues sharing one assignee value.
///
/// `count` always equals `issues.len()`; the only way to grow a bucket is
/// [`AssigneeStat::push`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssigneeStat {
    assignee: String,
    count: usize,
    issues: Vec<Issue>,
}

impl AssigneeStat {
    pub fn new(assignee: impl Into<String>) -> Self {
        Self {
            assignee: assignee.into(),
            count: 0,
            issues: Vec::new(),
        }
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
        self.count = self.issues.len();
    }

    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}
