//! One-shot issue views printed as JSON (`bugboard issues ...`).

use anyhow::{Context, Result};
use bugboard::IssueService;
use bugboard::config::DashboardConfig;

use super::super::IssuesCommands;

pub async fn cmd_issues(config: &DashboardConfig, command: &IssuesCommands) -> Result<()> {
    let service = IssueService::from_config(config).context("Failed to build GitHub client")?;

    let json = match command {
        IssuesCommands::Open => serde_json::to_string_pretty(&*service.open_issues().await?)?,
        IssuesCommands::ByAssignee => {
            serde_json::to_string_pretty(&service.issues_by_assignee().await?)?
        }
        IssuesCommands::Regression => {
            serde_json::to_string_pretty(&service.regression_issues().await?)?
        }
        IssuesCommands::RecentlyClosed { days } => {
            serde_json::to_string_pretty(&*service.recently_closed(*days).await?)?
        }
    };

    println!("{}", json);
    Ok(())
}
