//! Effective configuration view (`bugboard config`).

use anyhow::Result;
use bugboard::config::{DashboardConfig, TOKEN_PLACEHOLDER};

pub fn cmd_config(config: &DashboardConfig) -> Result<()> {
    let token = match config.token.as_deref().map(str::trim) {
        None | Some("") => "not set",
        Some(TOKEN_PLACEHOLDER) => "placeholder (ignored)",
        Some(_) => "set",
    };

    println!();
    println!("bugboard configuration");
    println!("======================");
    println!();
    println!("  repo                 = \"{}\"", config.repo);
    println!("  label                = \"{}\"", config.label);
    println!("  api_base             = \"{}\"", config.api_base);
    println!("  token                = {}", token);
    println!("  cache_ttl_secs       = {}", config.cache_ttl.as_secs());
    println!("  request_timeout_secs = {}", config.request_timeout.as_secs());
    println!("  failure_policy       = {}", config.failure_policy);
    println!();
    Ok(())
}
