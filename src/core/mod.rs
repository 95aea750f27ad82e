//! Core business logic: quotes, valuation and aggregation

pub mod aggregation;
pub mod config;
pub mod error;
pub mod log;
pub mod portfolio;
pub mod quote;
pub mod valuation;

// Re-export main types for cleaner imports
pub use aggregation::{AssetGroup, GroupTotals, PortfolioTotals};
pub use error::PortfolioError;
pub use portfolio::Portfolio;
pub use quote::{Quote, QuoteProvider};
pub use valuation::{Dividend, Holding, HoldingKind, HoldingValuation};
