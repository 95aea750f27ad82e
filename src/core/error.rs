//! Errors raised while turning configuration and quotes into a report.

use thiserror::Error;

/// Every failure here is fatal for the whole report: totals would silently
/// omit members if a partial result were rendered.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Failed to fetch quotes for {symbols}: {reason}")]
    FetchFailure { symbols: String, reason: String },

    #[error("Quote batch mismatch: requested {requested} symbols, received {received} quotes")]
    DataMismatch { requested: usize, received: usize },

    #[error("Quote symbol mismatch at position {index}: expected {expected}, received {received}")]
    SymbolMismatch {
        index: usize,
        expected: String,
        received: String,
    },

    #[error("Quote for {symbol} is missing required field {field}")]
    MissingField { symbol: String, field: &'static str },

    #[error("Malformed configuration: {0}")]
    MalformedConfig(String),
}

impl PortfolioError {
    pub fn fetch_failure(symbols: &[String], reason: impl ToString) -> Self {
        PortfolioError::FetchFailure {
            symbols: symbols.join(","),
            reason: reason.to_string(),
        }
    }
}
