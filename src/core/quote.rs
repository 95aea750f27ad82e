//! Quote abstractions and core types

use crate::core::error::PortfolioError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Provider snapshot of one symbol. Only `symbol` is guaranteed, the price
/// fields are checked by the valuation step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    #[serde(default)]
    pub regular_market_price: Option<Decimal>,
    #[serde(default)]
    pub regular_market_open: Option<Decimal>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub trailing_annual_dividend_rate: Option<Decimal>,
    #[serde(default)]
    pub trailing_annual_dividend_yield: Option<Decimal>,
}

impl Quote {
    /// Display name, `longName` preferred over `shortName`.
    pub fn display_name(&self) -> Option<&str> {
        self.long_name
            .as_deref()
            .or(self.short_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// Fetches one quote per requested symbol, in request order.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, PortfolioError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_long_name() {
        let quote = Quote {
            symbol: "AAPL".to_string(),
            long_name: Some("Apple Inc.".to_string()),
            short_name: Some("Apple".to_string()),
            ..Default::default()
        };
        assert_eq!(quote.display_name(), Some("Apple Inc."));

        let quote = Quote {
            symbol: "BTC-EUR".to_string(),
            short_name: Some("Bitcoin EUR".to_string()),
            ..Default::default()
        };
        assert_eq!(quote.display_name(), Some("Bitcoin EUR"));

        let quote = Quote {
            symbol: "XYZ".to_string(),
            ..Default::default()
        };
        assert_eq!(quote.display_name(), None);
    }

    #[test]
    fn test_quote_deserialization_from_provider_json() {
        let json = r#"{
            "symbol": "MSFT",
            "regularMarketPrice": 412.3,
            "regularMarketOpen": 410,
            "longName": "Microsoft Corporation",
            "trailingAnnualDividendRate": 2.84,
            "trailingAnnualDividendYield": 0.0069,
            "currency": "USD"
        }"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.symbol, "MSFT");
        assert_eq!(quote.regular_market_price, Some(Decimal::new(4123, 1)));
        assert_eq!(quote.regular_market_open, Some(Decimal::new(410, 0)));
        assert_eq!(quote.trailing_annual_dividend_rate, Some(Decimal::new(284, 2)));
        assert_eq!(
            quote.trailing_annual_dividend_yield,
            Some(Decimal::new(69, 4))
        );
        assert!(quote.short_name.is_none());
    }
}
