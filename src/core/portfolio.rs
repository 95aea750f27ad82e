//! Fetches quotes for every configured group and valuates the whole portfolio.
use crate::core::aggregation::{AssetGroup, PortfolioTotals, aggregate_portfolio};
use crate::core::config::GroupSpec;
use crate::core::error::PortfolioError;
use crate::core::quote::QuoteProvider;
use crate::core::valuation::valuate_batch;
use futures::future::try_join_all;
use tracing::{debug, info};

/// The valuated asset groups, the watchlist and the portfolio totals.
/// The watchlist never contributes to the totals.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub groups: Vec<AssetGroup>,
    pub watchlist: AssetGroup,
    pub totals: PortfolioTotals,
}

impl Portfolio {
    pub fn group(&self, title: &str) -> Option<&AssetGroup> {
        self.groups
            .iter()
            .chain(std::iter::once(&self.watchlist))
            .find(|g| g.title.eq_ignore_ascii_case(title))
    }
}

async fn valuate_group(
    spec: &GroupSpec,
    provider: &(dyn QuoteProvider + Send + Sync),
) -> Result<AssetGroup, PortfolioError> {
    let symbols = spec.symbols();
    debug!(group = %spec.title, ?symbols, "Fetching quotes");
    let quotes = provider.fetch_quotes(&symbols).await?;
    let holdings = valuate_batch(&spec.holdings, &quotes)?;
    Ok(AssetGroup::new(&spec.title, holdings))
}

/// Builds the portfolio with one quote request per group.
///
/// Requests run concurrently, results keep configuration order and the first
/// failure aborts the whole evaluation.
pub async fn evaluate(
    groups: &[GroupSpec],
    watchlist: &GroupSpec,
    provider: &(dyn QuoteProvider + Send + Sync),
) -> Result<Portfolio, PortfolioError> {
    let group_futures = groups.iter().map(|spec| valuate_group(spec, provider));
    let (groups, watchlist) = futures::try_join!(
        try_join_all(group_futures),
        valuate_group(watchlist, provider)
    )?;

    let group_totals: Vec<_> = groups.iter().map(|g| g.totals.clone()).collect();
    let totals = aggregate_portfolio(&group_totals);
    info!(
        groups = groups.len(),
        total_value = %totals.total_value,
        total_profit = %totals.total_profit,
        "Portfolio valuated"
    );

    Ok(Portfolio {
        groups,
        watchlist,
        totals,
    })
}
