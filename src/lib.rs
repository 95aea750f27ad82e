pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::report::{self, ReportStyle};
use crate::cli::snapshot;
use crate::core::config::AppConfig;
use crate::core::portfolio::{self, Portfolio};
use crate::core::quote::QuoteProvider;
use crate::providers::YahooQuoteProvider;
use anyhow::Result;
use tracing::{debug, info};

/// Commands producing output on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Render,
    Snapshot { group: String },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Validates the configuration and valuates every group against fresh quotes.
pub async fn load_portfolio(
    config: &AppConfig,
    provider: &(dyn QuoteProvider + Send + Sync),
) -> Result<Portfolio> {
    let groups = config.asset_groups()?;
    let watchlist = config.watchlist()?;
    Ok(portfolio::evaluate(&groups, &watchlist, provider).await?)
}

/// Runs a command and returns everything it would print. Nothing is
/// returned unless the whole command succeeded.
pub async fn execute(command: AppCommand, config_path: Option<&str>) -> Result<String> {
    info!("Portfolio ticker starting...");

    let config = load_config(config_path)?;
    let provider = YahooQuoteProvider::from_config(&config.yahoo());
    let portfolio = load_portfolio(&config, &provider).await?;

    match command {
        AppCommand::Render => {
            let style = ReportStyle::new(&config.display.font);
            let lines = report::render(
                &portfolio.totals,
                &portfolio.groups,
                &portfolio.watchlist,
                &style,
            );
            Ok(report::to_output(&lines))
        }
        AppCommand::Snapshot { group } => {
            let snapshot = snapshot::take(&portfolio, &group, chrono::Utc::now())?;
            let mut output = serde_json::to_string_pretty(&snapshot)?;
            output.push('\n');
            Ok(output)
        }
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let output = execute(command, config_path).await?;
    print!("{output}");
    Ok(())
}
