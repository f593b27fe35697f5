//! Error handling for carteira
//!
//! Defines the portfolio error taxonomy and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for portfolio operations
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("quote unavailable: {0}")]
    QuoteUnavailable(String),

    /// Raised by the advisor on an empty position set: the equal-weight
    /// target (1 / position count) is undefined.
    #[error("portfolio is empty: cannot compute recommendations yet")]
    EmptyPortfolio,

    /// Raised by the advisor when every position is valued at zero:
    /// allocation percentages are undefined.
    #[error("portfolio has no market valuation: cannot compute recommendations yet")]
    ZeroValuation,

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for portfolio operations
pub type Result<T> = anyhow::Result<T>;
