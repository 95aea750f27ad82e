//! Derives market value, profit, daily change and dividend income for
//! holdings from their quotes.
use crate::core::error::PortfolioError;
use crate::core::quote::Quote;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Monetary values keep two decimals, rounded when derived.
pub const MONEY_DP: u32 = 2;

/// Rounds a monetary value to [`MONEY_DP`] using banker's rounding. The
/// result always carries exactly two decimals.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(MONEY_DP);
    rounded.rescale(MONEY_DP);
    rounded
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoldingKind {
    Owned,
    Watched,
}

/// Static attributes of a position, as configured by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub title: Option<String>,
    pub owned_amount: Decimal,
    pub cost_basis_per_unit: Option<Decimal>,
    pub kind: HoldingKind,
}

impl Holding {
    pub fn owned(symbol: &str, amount: Decimal, cost_basis_per_unit: Option<Decimal>) -> Self {
        Holding {
            symbol: symbol.to_string(),
            title: None,
            owned_amount: amount,
            cost_basis_per_unit,
            kind: HoldingKind::Owned,
        }
    }

    pub fn watched(symbol: &str) -> Self {
        Holding {
            symbol: symbol.to_string(),
            title: None,
            owned_amount: Decimal::ZERO,
            cost_basis_per_unit: None,
            kind: HoldingKind::Watched,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// Trailing dividend data, only present when the quote carries it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dividend {
    pub annual_per_unit: Decimal,
    pub yield_percent: Option<Decimal>,
    pub my_annual: Decimal,
}

/// A holding together with the values derived from its quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingValuation {
    pub symbol: String,
    pub title: String,
    pub name: Option<String>,
    pub kind: HoldingKind,
    pub owned_amount: Decimal,
    pub current_price: Decimal,
    pub opening_price: Decimal,
    pub market_value: Decimal,
    pub profit: Option<Decimal>,
    pub change_today: Decimal,
    pub dividend: Option<Dividend>,
}

/// Valuates a single holding against its quote.
///
/// The caller is responsible for pairing the quote with the right holding,
/// see [`valuate_batch`].
pub fn valuate(holding: &Holding, quote: &Quote) -> Result<HoldingValuation, PortfolioError> {
    let current_price = quote
        .regular_market_price
        .ok_or_else(|| PortfolioError::MissingField {
            symbol: holding.symbol.clone(),
            field: "regularMarketPrice",
        })?;
    let opening_price = quote
        .regular_market_open
        .ok_or_else(|| PortfolioError::MissingField {
            symbol: holding.symbol.clone(),
            field: "regularMarketOpen",
        })?;

    let amount = holding.owned_amount;
    let market_value = round_money(amount * current_price);
    let profit = holding
        .cost_basis_per_unit
        .map(|cost| round_money(market_value - amount * cost));
    let change_today = round_money(market_value - amount * opening_price);

    let dividend = match (holding.kind, quote.trailing_annual_dividend_rate) {
        (HoldingKind::Owned, Some(rate)) => Some(Dividend {
            annual_per_unit: rate,
            yield_percent: quote
                .trailing_annual_dividend_yield
                .map(|y| y * Decimal::ONE_HUNDRED),
            my_annual: round_money(rate * amount),
        }),
        _ => None,
    };

    let name = quote.display_name().map(str::to_string);
    let title = holding
        .title
        .clone()
        .or_else(|| name.clone())
        .unwrap_or_else(|| holding.symbol.clone());

    debug!(
        symbol = %holding.symbol,
        %market_value,
        ?profit,
        %change_today,
        "Valuated holding"
    );

    Ok(HoldingValuation {
        symbol: holding.symbol.clone(),
        title,
        name,
        kind: holding.kind,
        owned_amount: amount,
        current_price,
        opening_price,
        market_value,
        profit,
        change_today,
        dividend,
    })
}

/// Valuates a group's holdings against the quotes fetched for them.
///
/// The batch sizes are compared before anything is computed, then each quote
/// must line up positionally with its holding.
pub fn valuate_batch(
    holdings: &[Holding],
    quotes: &[Quote],
) -> Result<Vec<HoldingValuation>, PortfolioError> {
    if holdings.len() != quotes.len() {
        return Err(PortfolioError::DataMismatch {
            requested: holdings.len(),
            received: quotes.len(),
        });
    }

    for (index, (holding, quote)) in holdings.iter().zip(quotes).enumerate() {
        if !holding.symbol.eq_ignore_ascii_case(&quote.symbol) {
            return Err(PortfolioError::SymbolMismatch {
                index,
                expected: holding.symbol.clone(),
                received: quote.symbol.clone(),
            });
        }
    }

    holdings
        .iter()
        .zip(quotes)
        .map(|(holding, quote)| valuate(holding, quote))
        .collect()
}
