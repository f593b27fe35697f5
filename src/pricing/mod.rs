// Pricing module - live quote adapters

pub mod yahoo;

use rust_decimal::Decimal;

use crate::error::Result;
use crate::ticker::NormalizedTicker;

pub use yahoo::YahooQuotes;

/// Live quote provider for normalized tickers
///
/// Implementations report failures explicitly. The aggregator degrades a
/// failed lookup to a zero price so the affected position is still rendered;
/// it never drops a position over a quote outage.
#[allow(async_fn_in_trait)]
pub trait QuoteSource {
    /// Current market price for one ticker.
    async fn price_of(&self, ticker: &NormalizedTicker) -> Result<Decimal>;

    /// Cumulative dividends paid over the trailing year.
    async fn dividends_of(&self, ticker: &NormalizedTicker) -> Result<Decimal>;
}

/// Quote source that never answers. Used when live fetching is disabled
/// (CARTEIRA_SKIP_PRICE_FETCH) so every price degrades to zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineQuotes;

impl QuoteSource for OfflineQuotes {
    async fn price_of(&self, ticker: &NormalizedTicker) -> Result<Decimal> {
        Err(crate::error::PortfolioError::QuoteUnavailable(format!(
            "price fetching disabled ({})",
            ticker
        ))
        .into())
    }

    async fn dividends_of(&self, ticker: &NormalizedTicker) -> Result<Decimal> {
        Err(crate::error::PortfolioError::QuoteUnavailable(format!(
            "price fetching disabled ({})",
            ticker
        ))
        .into())
    }
}
