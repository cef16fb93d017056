use bugboard_common::{ClosedIssue, Issue, IssueState, UNASSIGNED, UNKNOWN_CLOSER};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    pub name: String,
}

/// A record from `GET /repos/{owner}/{repo}/issues` (subset of fields).
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub html_url: String,
    pub assignee: Option<RawUser>,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_by: Option<RawUser>,
    /// Pull requests also come through the issues endpoint; filter them out.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    fn assignee_login(&self) -> String {
        self.assignee
            .as_ref()
            .map(|u| u.login.clone())
            .filter(|login| !login.is_empty())
            .unwrap_or_else(|| UNASSIGNED.to_string())
    }

    fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }

    pub fn into_issue(self) -> Issue {
        Issue {
            assignee: self.assignee_login(),
            labels: self.label_names(),
            id: self.id,
            number: self.number,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
            url: self.html_url,
            state: self.state,
        }
    }

    /// Returns `None` when the record carries no `closed_at`.
    pub fn into_closed_issue(self) -> Option<ClosedIssue> {
        let closed_at = self.closed_at?;
        let closed_by = self
            .closed_by
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_else(|| UNKNOWN_CLOSER.to_string());
        Some(ClosedIssue {
            assignee: self.assignee_login(),
            labels: self.label_names(),
            closed_by,
            closed_at,
            id: self.id,
            number: self.number,
            title: self.title,
            url: self.html_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> RawIssue {
        serde_json::from_value(json).unwrap()
    }

    fn base_json() -> serde_json::Value {
        serde_json::json!({
            "id": 9001,
            "number": 42,
            "title": "panic on empty input",
            "state": "open",
            "html_url": "https://github.com/o/r/issues/42",
            "assignee": {"login": "alice", "id": 1},
            "labels": [{"name": "kind/bug", "color": "ff0000"}, {"name": "severity/s1"}],
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-02T00:00:00Z",
            "body": "ignored"
        })
    }

    #[test]
    fn test_into_issue_normalizes_fields() {
        let issue = raw(base_json()).into_issue();
        assert_eq!(issue.id, 9001);
        assert_eq!(issue.number, 42);
        assert_eq!(issue.assignee, "alice");
        assert_eq!(issue.labels, vec!["kind/bug", "severity/s1"]);
        assert_eq!(issue.url, "https://github.com/o/r/issues/42");
        assert_eq!(issue.state, IssueState::Open);
        assert_eq!(issue.updated_at.to_rfc3339(), "2025-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_missing_assignee_maps_to_unassigned() {
        let mut json = base_json();
        json["assignee"] = serde_json::Value::Null;
        assert_eq!(raw(json).into_issue().assignee, UNASSIGNED);

        let mut json = base_json();
        json.as_object_mut().unwrap().remove("assignee");
        assert_eq!(raw(json).into_issue().assignee, UNASSIGNED);
    }

    #[test]
    fn test_pull_request_marker_detected() {
        let mut json = base_json();
        assert!(!raw(json.clone()).is_pull_request());
        json["pull_request"] = serde_json::json!({"url": "https://api.github.com/pulls/42"});
        assert!(raw(json).is_pull_request());
    }

    #[test]
    fn test_into_closed_issue_defaults_closer_to_unknown() {
        let mut json = base_json();
        json["state"] = "closed".into();
        json["closed_at"] = "2025-01-03T12:00:00Z".into();
        let closed = raw(json).into_closed_issue().unwrap();
        assert_eq!(closed.closed_by, UNKNOWN_CLOSER);
        assert_eq!(closed.closed_at.to_rfc3339(), "2025-01-03T12:00:00+00:00");
        assert_eq!(closed.assignee, "alice");
    }

    #[test]
    fn test_into_closed_issue_uses_closed_by_login() {
        let mut json = base_json();
        json["state"] = "closed".into();
        json["closed_at"] = "2025-01-03T12:00:00Z".into();
        json["closed_by"] = serde_json::json!({"login": "bob"});
        assert_eq!(raw(json).into_closed_issue().unwrap().closed_by, "bob");
    }

    #[test]
    fn test_into_closed_issue_without_closed_at_is_none() {
        let mut json = base_json();
        json["state"] = "closed".into();
        assert!(raw(json).into_closed_issue().is_none());
    }
}
