pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod github;
pub mod service;
pub mod telemetry;

pub use bugboard_common::{AssigneeStat, ClosedIssue, Issue, IssueState};
pub use service::IssueService;
