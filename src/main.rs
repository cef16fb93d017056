use std::time::Duration;

use anyhow::Result;
use bugboard::config::{
    DEFAULT_API_BASE, DEFAULT_CACHE_TTL_SECS, DEFAULT_LABEL, DEFAULT_REPO,
    DEFAULT_REQUEST_TIMEOUT_SECS, DashboardConfig, FailurePolicy, RepoSlug,
};
use bugboard::aggregate::MAX_CLOSED_DAYS;
use bugboard::dashboard::server::ServerConfig;
use bugboard::telemetry::{self, LogFormat, LogLevel};
use clap::{Args, Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "bugboard")]
#[command(version, about = "Bug dashboard backend over GitHub issues")]
pub struct Cli {
    /// Log verbosity for bugboard's own crates (RUST_LOG overrides)
    #[arg(long, global = true, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plaintext)]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub github: GitHubArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GitHubArgs {
    /// Repository to read issues from (owner/repo or a github.com URL)
    #[arg(long, global = true, env = "GITHUB_REPO", default_value = DEFAULT_REPO)]
    pub repo: RepoSlug,

    /// GitHub token; the sample placeholder value is ignored
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Only issues carrying this label are fetched
    #[arg(long, global = true, env = "GITHUB_LABEL", default_value = DEFAULT_LABEL)]
    pub label: String,

    #[arg(long, global = true, env = "GITHUB_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, global = true, env = "CACHE_TTL_SECS", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    #[arg(long, global = true, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// degrade: log and answer with an empty list; propagate: report the failure
    #[arg(long, global = true, env = "FAILURE_POLICY", value_enum, default_value_t = FailurePolicy::Degrade)]
    pub failure_policy: FailurePolicy,
}

impl GitHubArgs {
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            repo: self.repo.clone(),
            token: self.token.clone(),
            label: self.label.clone(),
            api_base: self.api_base.clone(),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            failure_policy: self.failure_policy,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard API
    Serve {
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to serve on
        #[arg(short, long, env = "PORT", default_value = "3001")]
        port: u16,

        /// Disable permissive CORS
        #[arg(long)]
        no_cors: bool,
    },
    /// Fetch one issue view and print it as JSON
    Issues {
        #[command(subcommand)]
        command: IssuesCommands,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Subcommand, Clone)]
pub enum IssuesCommands {
    /// All open issues carrying the label
    Open,
    /// Open issues grouped by assignee
    ByAssignee,
    /// Open issues that look like regressions
    Regression,
    /// Issues closed within the last N days
    RecentlyClosed {
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CLOSED_DAYS)))]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env: {}", e);
    }

    let cli = Cli::parse();
    telemetry::init(cli.log_level, cli.log_format)?;
    let config = cli.github.to_config();

    match &cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => {
            let server = ServerConfig {
                host: host.clone(),
                port: *port,
                cors: !*no_cors,
            };
            cmd::cmd_serve(&config, server).await?;
        }
        Commands::Issues { command } => cmd::cmd_issues(&config, command).await?,
        Commands::Config => cmd::cmd_config(&config)?,
    }

    Ok(())
}
