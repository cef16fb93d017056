//! End-to-end tests of the issue pipeline: GitHub client, pagination,
//! normalization, caching and aggregation, against a mock GitHub API.

use std::time::Duration;

use bugboard::IssueService;
use bugboard::config::{DashboardConfig, FailurePolicy, RepoSlug};
use bugboard::errors::{FetchError, ServiceError};
use chrono::Utc;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUES_PATH: &str = "/repos/acme/widgets/issues";

fn config_for(server: &MockServer) -> DashboardConfig {
    DashboardConfig {
        repo: RepoSlug::new("acme", "widgets"),
        api_base: server.uri(),
        cache_ttl: Duration::from_secs(300),
        ..DashboardConfig::default()
    }
}

fn issue(number: u64, title: &str, assignee: Option<&str>) -> Value {
    json!({
        "id": number + 5000,
        "number": number,
        "title": title,
        "state": "open",
        "html_url": format!("https://github.com/acme/widgets/issues/{}", number),
        "assignee": assignee.map(|login| json!({"login": login})),
        "labels": [{"name": "kind/bug"}, {"name": "severity/s1"}],
        "created_at": "2025-03-01T08:00:00Z",
        "updated_at": "2025-03-02T08:00:00Z"
    })
}

fn pull_request(number: u64) -> Value {
    let mut value = issue(number, "fix: tighten retry loop", Some("bob"));
    value["pull_request"] = json!({"url": "https://api.github.com/repos/acme/widgets/pulls/1"});
    value
}

fn closed(number: u64, hours_ago: i64, closer: Option<&str>) -> Value {
    let closed_at = Utc::now() - chrono::Duration::hours(hours_ago);
    let mut value = issue(number, "closed bug", Some("carol"));
    value["state"] = json!("closed");
    value["closed_at"] = json!(closed_at.to_rfc3339());
    value["closed_by"] = closer.map_or(Value::Null, |login| json!({"login": login}));
    value
}

#[tokio::test]
async fn test_open_issues_walk_pages_and_drop_pull_requests() {
    let server = MockServer::start().await;

    // 98 issues and 2 PRs fill the first page; the PRs still count toward its length.
    let mut first: Vec<Value> = (1..=98)
        .map(|n| issue(n, "bug", Some(if n % 2 == 0 { "alice" } else { "bob" })))
        .collect();
    first.push(pull_request(99));
    first.push(pull_request(100));
    let second = vec![issue(101, "Regression in planner", None), issue(102, "panic", None)];

    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("state", "open"))
        .and(query_param("labels", "kind/bug"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(second))
        .expect(1)
        .mount(&server)
        .await;

    let service = IssueService::from_config(&config_for(&server)).unwrap();
    let issues = service.open_issues().await.unwrap();

    assert_eq!(issues.len(), 100);
    assert!(issues.iter().all(|i| i.number != 99 && i.number != 100));
    assert_eq!(issues[0].labels, vec!["kind/bug", "severity/s1"]);
    assert_eq!(issues[99].assignee, "unassigned");
}

#[tokio::test]
async fn test_views_share_one_fetch_within_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("state", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            issue(1, "Performance regression on TPCH q5", Some("alice")),
            issue(2, "性能回归", Some("bob")),
            issue(3, "wrong result", Some("alice")),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let service = IssueService::from_config(&config_for(&server)).unwrap();

    let open = service.open_issues().await.unwrap();
    let grouped = service.issues_by_assignee().await.unwrap();
    let regressions = service.regression_issues().await.unwrap();

    assert_eq!(open.len(), 3);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].assignee(), "alice");
    assert_eq!(grouped[0].count(), 2);
    assert_eq!(
        regressions.iter().map(|i| i.number).collect::<Vec<_>>(),
        vec![1, 2]
    );
}

#[tokio::test]
async fn test_recently_closed_filters_locally_on_closed_at() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("state", "closed"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            closed(10, 2, Some("dave")),
            // Updated recently, closed long ago.
            closed(11, 24 * 5, Some("dave")),
            closed(12, 20, None),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let service = IssueService::from_config(&config_for(&server)).unwrap();
    let recent = service.recently_closed(1).await.unwrap();

    assert_eq!(recent.iter().map(|i| i.number).collect::<Vec<_>>(), vec![10, 12]);
    assert_eq!(recent[0].closed_by, "dave");
    assert_eq!(recent[1].closed_by, "unknown");
}

#[tokio::test]
async fn test_token_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Value>::new()))
        .expect(1)
        .mount(&server)
        .await;

    let config = DashboardConfig {
        token: Some("ghp_test".into()),
        ..config_for(&server)
    };
    let service = IssueService::from_config(&config).unwrap();
    assert!(service.open_issues().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_propagate_reports_page_of_failure() {
    let server = MockServer::start().await;
    let full: Vec<Value> = (1..=100).map(|n| issue(n, "bug", None)).collect();
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let config = DashboardConfig {
        failure_policy: FailurePolicy::Propagate,
        ..config_for(&server)
    };
    let service = IssueService::from_config(&config).unwrap();

    match service.open_issues().await {
        Err(ServiceError::Fetch(FetchError::Auth { page, status })) => {
            assert_eq!(page, 2);
            assert_eq!(status, 403);
        }
        other => panic!("expected auth failure on page 2, got {:?}", other),
    }
}

#[tokio::test]
async fn test_degrade_caches_empty_result_for_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let service = IssueService::from_config(&config_for(&server)).unwrap();

    assert!(service.open_issues().await.unwrap().is_empty());
    assert!(service.issues_by_assignee().await.unwrap().is_empty());
}
