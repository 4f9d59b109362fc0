use anyhow::Context;
use clap::Parser;
use contrib_stats::reports::{write_report, ReportContext};
use contrib_stats::services::{ContributorStatsService, ReqwestTransport};
use contrib_stats::utils::config::{Cli, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file FIRST so clap can see its values
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = Config::from_cli(cli, chrono::Local::now().date_naive())
        .context("Invalid configuration")?;

    log::info!("📝 Configuration loaded:");
    log::info!("   - Repository: {}/{}", config.owner, config.repo);
    log::info!("   - Contributor: {}", config.contributor);
    log::info!(
        "   - Window: {} .. {}",
        config.window.start_date(),
        config.window.end_date()
    );
    log::info!("   - Endpoint: {:?}", config.endpoint);
    log::info!("   - Commits: {}", if config.include_commits { "ENABLED" } else { "DISABLED" });
    log::info!(
        "   - Token: {}",
        if config.token.is_some() { "provided" } else { "none (unauthenticated rate limits apply)" }
    );

    let transport = ReqwestTransport::new()?;
    let service = ContributorStatsService::new(&transport, &config);

    let statistics = match service.collect().await {
        Ok(statistics) => statistics,
        Err(e) => {
            if e.is_rate_limited() {
                log::error!("GitHub rejected the request, likely a rate limit. Supply a token with --token or GITHUB_TOKEN.");
            }
            return Err(e).context("Failed to collect contributor statistics");
        }
    };

    write_report(
        &statistics,
        &ReportContext::from_config(&config),
        config.format,
        &config.output,
    )?;

    log::info!(
        "✅ Statistics generated successfully. Please check the file: {}",
        config.output.display()
    );

    Ok(())
}
