//! Remote issue tracker access.
//!
//! - `models`: raw GitHub records and their normalization into [`bugboard_common::Issue`]
//! - `client`: the [`IssueSource`] seam and its reqwest-backed [`GitHubClient`]
//! - `fetcher`: [`IssueQuery`] and the paginated [`fetch_issues`] driver

pub mod client;
pub mod fetcher;
pub mod models;

pub use client::{GitHubClient, IssueSource};
pub use fetcher::{CLOSED_MAX_PAGES, IssueQuery, OPEN_MAX_PAGES, PAGE_SIZE, fetch_issues};
pub use models::RawIssue;
