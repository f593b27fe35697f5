//! Integration tests for the carteira tracker
//!
//! These tests verify end-to-end library functionality:
//! - Lot entry through the validating constructor and CSV store
//! - Store round-trip fidelity
//! - Consolidation with weighted-average cost and live-quote enrichment
//! - Equal-weight rebalancing suggestions
//! - Degraded behavior when quotes are unavailable

use std::collections::HashMap;

use anyhow::Result;
use carteira::error::PortfolioError;
use carteira::pricing::QuoteSource;
use carteira::reports::{self, Action};
use carteira::store::{CsvLotStore, LotStore, PurchaseLot};
use carteira::ticker::{classify, normalize, AssetCategory, NormalizedTicker};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Test helper: quote source backed by a fixed price book
struct PriceBook(HashMap<String, Decimal>);

impl PriceBook {
    fn new(prices: &[(&str, Decimal)]) -> Self {
        Self(prices.iter().map(|(t, p)| (t.to_string(), *p)).collect())
    }
}

impl QuoteSource for PriceBook {
    async fn price_of(&self, ticker: &NormalizedTicker) -> Result<Decimal> {
        self.0
            .get(ticker.as_str())
            .copied()
            .ok_or_else(|| PortfolioError::QuoteUnavailable(ticker.as_str().to_string()).into())
    }

    async fn dividends_of(&self, _ticker: &NormalizedTicker) -> Result<Decimal> {
        Ok(Decimal::ZERO)
    }
}

/// Test helper: temporary CSV-backed store
fn create_test_store() -> (TempDir, CsvLotStore) {
    let dir = TempDir::new().unwrap();
    let store = CsvLotStore::new(dir.path().join("lots.csv"));
    (dir, store)
}

fn add_lot(store: &CsvLotStore, raw_ticker: &str, price: Decimal, quantity: u32) {
    let ticker = normalize(raw_ticker).unwrap();
    let category = classify(&ticker);
    let lot = PurchaseLot::new(ticker, price, quantity, category, None).unwrap();
    store.append_and_persist(lot).unwrap();
}

#[test]
fn lot_round_trips_through_the_store() -> Result<()> {
    let (_dir, store) = create_test_store();

    let original = PurchaseLot::new(
        normalize("vale3")?,
        dec!(61.37),
        10,
        AssetCategory::Stock,
        NaiveDate::from_ymd_opt(2026, 1, 5),
    )?;
    store.append_and_persist(original.clone())?;

    let read_back = store.read_all()?;
    assert_eq!(read_back, vec![original]);
    Ok(())
}

#[tokio::test]
async fn lots_consolidate_into_priced_positions() -> Result<()> {
    let (_dir, store) = create_test_store();
    add_lot(&store, "VALE3", dec!(10), 2);
    add_lot(&store, "HGLG11", dec!(160), 2);
    add_lot(&store, "VALE3", dec!(20), 2);

    let quotes = PriceBook::new(&[("VALE3.SA", dec!(18)), ("HGLG11.SA", dec!(150))]);
    let report = reports::aggregate_report(&store.read_all()?, &quotes).await;

    assert_eq!(report.positions.len(), 2);

    let vale = &report.positions[0];
    assert_eq!(vale.ticker.as_str(), "VALE3.SA");
    assert_eq!(vale.category, AssetCategory::Stock);
    assert_eq!(vale.weighted_average_price, dec!(15));
    assert_eq!(vale.total_quantity, 4);
    assert_eq!(vale.market_value, dec!(72));
    assert_eq!(vale.unrealized_pnl, dec!(12));

    let hglg = &report.positions[1];
    assert_eq!(hglg.category, AssetCategory::Fii);
    assert_eq!(hglg.market_value, dec!(300));
    assert_eq!(hglg.unrealized_pnl, dec!(-20));

    assert_eq!(report.total_value, dec!(372));
    assert_eq!(report.total_pnl, dec!(-8));
    Ok(())
}

#[tokio::test]
async fn full_flow_from_lots_to_recommendations() -> Result<()> {
    let (_dir, store) = create_test_store();
    add_lot(&store, "VALE3", dec!(50), 2); // valued at 100 below
    add_lot(&store, "HGLG11", dec!(100), 3); // valued at 300 below

    let quotes = PriceBook::new(&[("VALE3.SA", dec!(50)), ("HGLG11.SA", dec!(100))]);
    let positions = reports::aggregate(&store.read_all()?, &quotes).await;
    let recs = reports::suggest(&positions)?;

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].ticker.as_str(), "VALE3.SA");
    assert_eq!(recs[0].action, Action::Buy);
    assert_eq!(recs[0].gap_pct, dec!(25.0));
    assert_eq!(recs[1].action, Action::Wait);
    assert_eq!(recs[1].gap_pct, dec!(-25.0));
    Ok(())
}

#[tokio::test]
async fn quote_outage_degrades_prices_but_blocks_suggestions() -> Result<()> {
    let (_dir, store) = create_test_store();
    add_lot(&store, "VALE3", dec!(50), 2);

    // Quote source knows nothing: dashboard still renders a zero-priced
    // position, but the advisor refuses to divide by a zero valuation.
    let quotes = PriceBook::new(&[]);
    let positions = reports::aggregate(&store.read_all()?, &quotes).await;
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].current_price, Decimal::ZERO);

    let err = reports::suggest(&positions).unwrap_err();
    assert!(matches!(err, PortfolioError::ZeroValuation));
    Ok(())
}

#[tokio::test]
async fn empty_store_yields_empty_aggregate_and_advisor_error() -> Result<()> {
    let (_dir, store) = create_test_store();
    let quotes = PriceBook::new(&[]);

    let positions = reports::aggregate(&store.read_all()?, &quotes).await;
    assert!(positions.is_empty());

    let err = reports::suggest(&positions).unwrap_err();
    assert!(matches!(err, PortfolioError::EmptyPortfolio));
    Ok(())
}
