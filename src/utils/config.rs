use crate::error::{Result, StatsError};
use crate::models::DateWindow;
use crate::reports::ReportFormat;
use crate::services::paginator::DEFAULT_PAGE_DELAY;
use crate::services::query_builder::EndpointFamily;
use crate::utils::validators::{
    parse_date, validate_login, validate_repo_name, validate_url, validate_username,
};
use chrono::{Months, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Command line surface. Values not given on the command line fall back to
/// the environment (a `.env` file is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(name = "contrib-stats")]
#[command(about = "Collect a contributor's pull requests, issues and commits in a GitHub repository")]
#[command(version)]
pub struct Cli {
    #[arg(long, env = "REPO_OWNER", help = "Repository owner")]
    pub owner: String,

    #[arg(long, env = "REPO_NAME", help = "Repository name")]
    pub repo: String,

    #[arg(long, env = "CONTRIBUTOR", help = "Contributor username")]
    pub contributor: String,

    #[arg(long, help = "Start date (YYYY-MM-DD), defaults to one month ago")]
    pub start_date: Option<String>,

    #[arg(long, help = "End date (YYYY-MM-DD), defaults to today")]
    pub end_date: Option<String>,

    #[arg(long, help = "Include commit data in statistics", default_value_t = false)]
    pub include_commits: bool,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub authentication token")]
    pub token: Option<String>,

    #[arg(long, help = "Trace every HTTP request URL", default_value_t = false)]
    pub debug: bool,

    #[arg(long, value_enum, default_value_t = EndpointFamily::Listing, help = "Query the repository listing endpoints or the search endpoint")]
    pub endpoint: EndpointFamily,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, help = "GitHub API base URL")]
    pub api_url: String,

    #[arg(long, default_value_t = DEFAULT_PAGE_DELAY.as_millis() as u64, help = "Delay between page requests in milliseconds")]
    pub page_delay_ms: u64,

    #[arg(long, default_value = "statistics.html", help = "Output filename")]
    pub output: PathBuf,

    #[arg(long, value_enum, help = "Report format, inferred from the output extension when omitted")]
    pub format: Option<ReportFormat>,
}

/// Validated run configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub contributor: String,
    pub window: DateWindow,
    pub include_commits: bool,
    pub token: Option<String>,
    pub debug: bool,
    pub endpoint: EndpointFamily,
    pub api_base_url: String,
    pub page_delay: Duration,
    pub output: PathBuf,
    pub format: ReportFormat,
}

impl Config {
    /// Validate and normalize parsed arguments. `today` anchors the default window.
    pub fn from_cli(cli: Cli, today: NaiveDate) -> Result<Self> {
        validate_username(&cli.owner)?;
        validate_repo_name(&cli.repo)?;
        validate_login(&cli.contributor)?;
        let api_url = validate_url(&cli.api_url)?;

        let start = match cli.start_date.as_deref() {
            Some(value) => parse_date(value)?,
            None => today.checked_sub_months(Months::new(1)).ok_or_else(|| {
                StatsError::InvalidInput(format!("cannot compute a month before {}", today))
            })?,
        };
        let end = match cli.end_date.as_deref() {
            Some(value) => parse_date(value)?,
            None => today,
        };
        let window = DateWindow::new(start, end)?;

        let format = cli
            .format
            .unwrap_or_else(|| ReportFormat::from_path(&cli.output));

        Ok(Config {
            owner: cli.owner,
            repo: cli.repo,
            contributor: cli.contributor,
            window,
            include_commits: cli.include_commits,
            token: cli.token.filter(|t| !t.trim().is_empty()),
            debug: cli.debug,
            endpoint: cli.endpoint,
            api_base_url: api_url.as_str().trim_end_matches('/').to_string(),
            page_delay: Duration::from_millis(cli.page_delay_ms),
            output: cli.output,
            format,
        })
    }
}
