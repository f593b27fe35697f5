//! Lot storage - the persisted flat table of purchase records
//!
//! The store is the sole source of truth for purchase lots. Positions and
//! allocation targets are always recomputed from it, never persisted.

pub mod csv;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;
use crate::ticker::{AssetCategory, NormalizedTicker};

pub use self::csv::CsvLotStore;

/// One recorded buy transaction
///
/// Lots are append-only: the table is read, the new row concatenated, and the
/// whole table rewritten. No update or delete of individual lots exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseLot {
    pub ticker: NormalizedTicker,
    pub purchase_price: Decimal,
    pub quantity: u32,
    pub category: AssetCategory,
    /// Informational only; no lot-level date arithmetic exists
    pub purchase_date: Option<NaiveDate>,
}

impl PurchaseLot {
    /// Build a lot, enforcing the entry-form invariants: quantity >= 1 and a
    /// non-negative purchase price.
    pub fn new(
        ticker: NormalizedTicker,
        purchase_price: Decimal,
        quantity: u32,
        category: AssetCategory,
        purchase_date: Option<NaiveDate>,
    ) -> Result<Self, PortfolioError> {
        if quantity == 0 {
            return Err(PortfolioError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }
        if purchase_price < Decimal::ZERO {
            return Err(PortfolioError::Validation(format!(
                "purchase price must not be negative (got {})",
                purchase_price
            )));
        }
        Ok(Self {
            ticker,
            purchase_price,
            quantity,
            category,
            purchase_date,
        })
    }
}

/// Persistence adapter for the lot table
///
/// Adapters report failures explicitly; callers decide whether to degrade
/// (read failures become an empty table so views still render) or surface
/// (write failures abort the command).
pub trait LotStore {
    /// Read the full lot table in insertion order.
    fn read_all(&self) -> crate::error::Result<Vec<PurchaseLot>>;

    /// Append one lot and persist the whole table.
    ///
    /// Full-table rewrite semantics: read everything, concatenate the new
    /// row, write everything back. The sequence is not atomic; two writers
    /// racing on the same table can lose an update. Accepted limitation of
    /// the spreadsheet-style store, not coordinated with locking.
    fn append_and_persist(&self, lot: PurchaseLot) -> crate::error::Result<()>;
}
