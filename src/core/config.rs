use crate::core::error::PortfolioError;
use crate::core::valuation::{Holding, HoldingKind};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HoldingConfig {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, alias = "buyin")]
    pub cost_basis: Option<Decimal>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GroupConfig {
    pub title: String,
    #[serde(default)]
    pub holdings: Vec<HoldingConfig>,
}

fn default_watchlist_title() -> String {
    "Watchlist".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WatchlistConfig {
    #[serde(default = "default_watchlist_title")]
    pub title: String,
    #[serde(default)]
    pub holdings: Vec<HoldingConfig>,
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        WatchlistConfig {
            title: default_watchlist_title(),
            holdings: Vec::new(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct YahooProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for YahooProviderConfig {
    fn default() -> Self {
        YahooProviderConfig {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub yahoo: Option<YahooProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            yahoo: Some(YahooProviderConfig::default()),
        }
    }
}

fn default_font() -> String {
    "Menlo".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_font")]
    pub font: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            font: default_font(),
        }
    }
}

/// A validated group of holdings, ready to be fetched and valuated.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    pub title: String,
    pub holdings: Vec<Holding>,
}

impl GroupSpec {
    pub fn symbols(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.symbol.clone()).collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "tickerbar", "tickerbar")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn yahoo(&self) -> YahooProviderConfig {
        self.providers.yahoo.clone().unwrap_or_default()
    }

    /// Validates the configured groups into holdings.
    pub fn asset_groups(&self) -> Result<Vec<GroupSpec>, PortfolioError> {
        self.groups
            .iter()
            .map(|group| {
                if group.title.trim().is_empty() {
                    return Err(PortfolioError::MalformedConfig(
                        "asset group without a title".to_string(),
                    ));
                }
                let holdings = group
                    .holdings
                    .iter()
                    .enumerate()
                    .map(|(index, h)| to_holding(h, &group.title, index, HoldingKind::Owned))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(GroupSpec {
                    title: group.title.clone(),
                    holdings,
                })
            })
            .collect()
    }

    pub fn watchlist(&self) -> Result<GroupSpec, PortfolioError> {
        let holdings = self
            .watchlist
            .holdings
            .iter()
            .enumerate()
            .map(|(index, h)| to_holding(h, &self.watchlist.title, index, HoldingKind::Watched))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GroupSpec {
            title: self.watchlist.title.clone(),
            holdings,
        })
    }
}

fn to_holding(
    config: &HoldingConfig,
    group: &str,
    index: usize,
    kind: HoldingKind,
) -> Result<Holding, PortfolioError> {
    let symbol = config
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            PortfolioError::MalformedConfig(format!(
                "holding #{} in {group} has no symbol",
                index + 1
            ))
        })?;

    let mut holding = match kind {
        HoldingKind::Watched => Holding::watched(symbol),
        HoldingKind::Owned => {
            let amount = config.amount.ok_or_else(|| {
                PortfolioError::MalformedConfig(format!("{symbol} in {group} has no amount"))
            })?;
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(PortfolioError::MalformedConfig(format!(
                    "{symbol} in {group} has a negative amount"
                )));
            }
            Holding::owned(symbol, amount, config.cost_basis)
        }
    };
    holding.title = config.title.clone();
    Ok(holding)
}
