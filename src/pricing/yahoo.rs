//! Yahoo Finance quote adapter
//!
//! Uses the v8 chart API. Tickers arrive already exchange-qualified
//! (e.g. "VALE3.SA"), so the symbol is used as-is.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::ticker::NormalizedTicker;

use super::QuoteSource;

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance quote response
#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Meta,
    events: Option<Events>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Events {
    dividends: Option<HashMap<String, DividendEvent>>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

/// Live quote source over the Yahoo Finance chart API
#[derive(Debug, Clone)]
pub struct YahooQuotes {
    client: Client,
}

impl YahooQuotes {
    /// Build a client with a bounded per-request timeout. A slow provider
    /// degrades that ticker to a zero price instead of blocking the render.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; CarteiraBot/1.0)")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    async fn fetch_chart(&self, url: &str) -> Result<ChartResult> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request to Yahoo Finance")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Yahoo Finance returned error status: {}",
                response.status()
            ));
        }

        let data: YahooQuoteResponse = response
            .json()
            .await
            .context("Failed to parse Yahoo Finance response")?;

        if let Some(error) = data.chart.error {
            return Err(anyhow!(
                "Yahoo Finance API error: {} - {}",
                error.code,
                error.description
            ));
        }

        data.chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| anyhow!("No data returned from Yahoo Finance"))
    }
}

impl QuoteSource for YahooQuotes {
    async fn price_of(&self, ticker: &NormalizedTicker) -> Result<Decimal> {
        info!("Fetching current price for {} from Yahoo Finance", ticker);
        let url = format!("{}/{}", CHART_BASE_URL, ticker);
        let result = self.fetch_chart(&url).await?;

        let price = result
            .meta
            .regular_market_price
            .ok_or_else(|| anyhow!("No price data available for {}", ticker))?;

        Decimal::from_f64_retain(price).ok_or_else(|| anyhow!("Invalid price value: {}", price))
    }

    async fn dividends_of(&self, ticker: &NormalizedTicker) -> Result<Decimal> {
        info!("Fetching trailing-year dividends for {}", ticker);
        let url = format!("{}/{}?range=1y&interval=1mo&events=div", CHART_BASE_URL, ticker);
        let result = self.fetch_chart(&url).await?;

        let dividends = result
            .events
            .and_then(|e| e.dividends)
            .unwrap_or_default();

        let mut total = Decimal::ZERO;
        for event in dividends.values() {
            total += Decimal::from_f64_retain(event.amount)
                .ok_or_else(|| anyhow!("Invalid dividend amount: {}", event.amount))?;
        }
        debug!("{} paid {} over the trailing year", ticker, total);
        Ok(total)
    }
}
