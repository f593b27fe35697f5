//! Ticker normalization and category classification
//!
//! User-entered symbols are canonicalized once, at lot-entry time, before a
//! record ever reaches the store: trimmed, uppercased, and qualified with the
//! B3 exchange suffix used by the quote provider.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;

/// Yahoo Finance suffix for B3-listed symbols
pub const B3_SUFFIX: &str = ".SA";

/// Asset categories tracked by the portfolio
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    /// Brazilian stocks (ações)
    Stock,
    /// Real estate investment funds (fundos imobiliários)
    Fii,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Stock => "STOCK",
            AssetCategory::Fii => "FII",
        }
    }
}

impl std::str::FromStr for AssetCategory {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STOCK" | "ACOES" | "AÇÕES" => Ok(AssetCategory::Stock),
            "FII" => Ok(AssetCategory::Fii),
            other => Err(PortfolioError::Validation(format!(
                "unknown asset category '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An exchange-qualified, uppercase ticker symbol (e.g. "VALE3.SA")
///
/// Only obtainable through [`normalize`], so any value of this type already
/// carries the suffix and casing invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NormalizedTicker(String);

impl NormalizedTicker {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The symbol without the exchange suffix, for display
    pub fn base(&self) -> &str {
        self.0.strip_suffix(B3_SUFFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for NormalizedTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a raw user-entered symbol.
///
/// Trims whitespace, uppercases, and appends the `.SA` suffix unless already
/// present. Empty input is rejected with a validation error rather than mapped
/// to a sentinel ticker.
pub fn normalize(raw: &str) -> Result<NormalizedTicker, PortfolioError> {
    let trimmed = raw.trim().to_ascii_uppercase();
    if trimmed.is_empty() {
        return Err(PortfolioError::Validation(
            "ticker must not be empty".to_string(),
        ));
    }
    if trimmed.ends_with(B3_SUFFIX) {
        Ok(NormalizedTicker(trimmed))
    } else {
        Ok(NormalizedTicker(format!("{}{}", trimmed, B3_SUFFIX)))
    }
}

/// Classify a ticker into its asset category.
///
/// Purely lexical: B3 real-estate-fund tickers conventionally end in "11", so
/// any ticker containing that substring is treated as a FII. This is a known
/// heuristic limitation, not a validated exchange lookup.
pub fn classify(ticker: &NormalizedTicker) -> AssetCategory {
    if ticker.as_str().contains("11") {
        AssetCategory::Fii
    } else {
        AssetCategory::Stock
    }
}
