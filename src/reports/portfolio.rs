//! Portfolio aggregation
//!
//! Consolidates the raw lot table into one position per ticker and enriches
//! each with a live quote and derived valuation fields.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::pricing::QuoteSource;
use crate::store::PurchaseLot;
use crate::ticker::{AssetCategory, NormalizedTicker};

/// Consolidated holdings for one ticker across all of its lots
///
/// Ephemeral: recomputed on every render, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub ticker: NormalizedTicker,
    pub category: AssetCategory,
    /// Quantity-weighted mean purchase price across the ticker's lots
    pub weighted_average_price: Decimal,
    pub total_quantity: u64,
    /// Zero when the quote lookup failed; the position is still included
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub unrealized_pnl: Decimal,
}

/// Complete portfolio view with dashboard totals
#[derive(Debug, Clone)]
pub struct PortfolioReport {
    pub positions: Vec<Position>,
    pub total_value: Decimal,
    pub total_pnl: Decimal,
}

/// Per-ticker accumulator while walking the lot table
struct LotGroup {
    ticker: NormalizedTicker,
    category: AssetCategory,
    total_quantity: u64,
    // Sum of price * quantity, the weighted-mean numerator
    cost_sum: Decimal,
}

/// Consolidate lots into positions, one live quote per distinct ticker.
///
/// Groups preserve first-seen insertion order. The category is taken from the
/// first lot of each ticker; a later lot that disagrees only logs a warning
/// (lots are never rewritten retroactively). A failed quote lookup degrades
/// that position to a zero price rather than dropping it or aborting the
/// whole aggregation. Empty input yields empty output.
pub async fn aggregate<Q: QuoteSource>(lots: &[PurchaseLot], quotes: &Q) -> Vec<Position> {
    let mut order: Vec<LotGroup> = Vec::new();
    let mut index: HashMap<NormalizedTicker, usize> = HashMap::new();

    for lot in lots {
        match index.get(&lot.ticker) {
            Some(&i) => {
                let group = &mut order[i];
                if group.category != lot.category {
                    warn!(
                        "{}: lot categorized as {} but position already {}; keeping first-seen",
                        lot.ticker, lot.category, group.category
                    );
                }
                group.total_quantity += u64::from(lot.quantity);
                group.cost_sum += lot.purchase_price * Decimal::from(lot.quantity);
            }
            None => {
                index.insert(lot.ticker.clone(), order.len());
                order.push(LotGroup {
                    ticker: lot.ticker.clone(),
                    category: lot.category,
                    total_quantity: u64::from(lot.quantity),
                    cost_sum: lot.purchase_price * Decimal::from(lot.quantity),
                });
            }
        }
    }

    let mut positions = Vec::with_capacity(order.len());
    for group in order {
        let current_price = match quotes.price_of(&group.ticker).await {
            Ok(price) => price,
            Err(e) => {
                warn!("{}: quote lookup failed ({}); using zero price", group.ticker, e);
                Decimal::ZERO
            }
        };

        let quantity = Decimal::from(group.total_quantity);
        // quantity >= 1 is a lot invariant, so the group sum is never zero
        let weighted_average_price = group.cost_sum / quantity;
        let market_value = current_price * quantity;
        let unrealized_pnl = (current_price - weighted_average_price) * quantity;

        positions.push(Position {
            ticker: group.ticker,
            category: group.category,
            weighted_average_price,
            total_quantity: group.total_quantity,
            current_price,
            market_value,
            unrealized_pnl,
        });
    }

    positions
}

/// Aggregate and sum the dashboard totals.
pub async fn aggregate_report<Q: QuoteSource>(lots: &[PurchaseLot], quotes: &Q) -> PortfolioReport {
    let positions = aggregate(lots, quotes).await;
    let total_value = positions.iter().map(|p| p.market_value).sum();
    let total_pnl = positions.iter().map(|p| p.unrealized_pnl).sum();
    PortfolioReport {
        positions,
        total_value,
        total_pnl,
    }
}

/// Consolidate the lots of a single ticker without touching the network.
///
/// Backs the per-asset detail view, which shows cost-side figures only.
pub fn consolidate_lots(lots: &[PurchaseLot]) -> Option<(Decimal, u64, AssetCategory)> {
    let first = lots.first()?;
    let mut total_quantity: u64 = 0;
    let mut cost_sum = Decimal::ZERO;
    for lot in lots {
        total_quantity += u64::from(lot.quantity);
        cost_sum += lot.purchase_price * Decimal::from(lot.quantity);
    }
    let weighted_average = cost_sum / Decimal::from(total_quantity);
    Some((weighted_average, total_quantity, first.category))
}
