//! Sums valuated holdings into group totals and group totals into portfolio totals.
use crate::core::valuation::{HoldingValuation, round_money};
use rust_decimal::Decimal;
use serde::Serialize;

/// Totals of one asset group. `annual_dividend` is `None` when no member
/// carries dividend data, which is different from a zero dividend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotals {
    pub market_value: Decimal,
    pub profit: Decimal,
    pub change_today: Decimal,
    pub annual_dividend: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioTotals {
    pub total_value: Decimal,
    pub total_profit: Decimal,
    pub total_change_today: Decimal,
    pub total_annual_dividend: Option<Decimal>,
}

/// A titled set of valuated holdings with its totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetGroup {
    pub title: String,
    pub holdings: Vec<HoldingValuation>,
    pub totals: GroupTotals,
}

impl AssetGroup {
    pub fn new(title: &str, holdings: Vec<HoldingValuation>) -> Self {
        let totals = aggregate_group(&holdings);
        AssetGroup {
            title: title.to_string(),
            holdings,
            totals,
        }
    }
}

/// Sums the given values in order, or `None` when none is present.
fn sum_present(values: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    values.fold(None, |acc, value| match (acc, value) {
        (None, None) => None,
        (acc, value) => Some(acc.unwrap_or_default() + value.unwrap_or_default()),
    })
}

pub fn aggregate_group(holdings: &[HoldingValuation]) -> GroupTotals {
    let market_value: Decimal = holdings.iter().map(|h| h.market_value).sum();
    let profit: Decimal = holdings.iter().filter_map(|h| h.profit).sum();
    let change_today: Decimal = holdings.iter().map(|h| h.change_today).sum();
    let annual_dividend = sum_present(
        holdings
            .iter()
            .map(|h| h.dividend.as_ref().map(|d| d.my_annual)),
    );

    GroupTotals {
        market_value: round_money(market_value),
        profit: round_money(profit),
        change_today: round_money(change_today),
        annual_dividend: annual_dividend.map(round_money),
    }
}

pub fn aggregate_portfolio(groups: &[GroupTotals]) -> PortfolioTotals {
    let total_value: Decimal = groups.iter().map(|g| g.market_value).sum();
    let total_profit: Decimal = groups.iter().map(|g| g.profit).sum();
    let total_change_today: Decimal = groups.iter().map(|g| g.change_today).sum();
    let total_annual_dividend = sum_present(groups.iter().map(|g| g.annual_dividend));

    PortfolioTotals {
        total_value: round_money(total_value),
        total_profit: round_money(total_profit),
        total_change_today: round_money(total_change_today),
        total_annual_dividend: total_annual_dividend.map(round_money),
    }
}
