//! CSV-backed lot store
//!
//! One flat CSV file holds the whole lot table, mirroring the spreadsheet the
//! tracker originally lived in. Appends rewrite the entire file.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PortfolioError, Result};
use crate::ticker::{self, AssetCategory};

use super::{LotStore, PurchaseLot};

/// Serialized row layout of the lot table
#[derive(Debug, Serialize, Deserialize)]
struct LotRow {
    ticker: String,
    purchase_price: Decimal,
    quantity: u32,
    category: String,
    purchase_date: Option<NaiveDate>,
}

impl From<&PurchaseLot> for LotRow {
    fn from(lot: &PurchaseLot) -> Self {
        Self {
            ticker: lot.ticker.as_str().to_string(),
            purchase_price: lot.purchase_price,
            quantity: lot.quantity,
            category: lot.category.as_str().to_string(),
            purchase_date: lot.purchase_date,
        }
    }
}

impl LotRow {
    fn into_lot(self) -> Result<PurchaseLot> {
        // Tickers are normalized before storage; re-normalizing on read keeps
        // the invariant even for hand-edited files.
        let ticker = ticker::normalize(&self.ticker)?;
        let category = AssetCategory::from_str(&self.category)?;
        Ok(PurchaseLot::new(
            ticker,
            self.purchase_price,
            self.quantity,
            category,
            self.purchase_date,
        )?)
    }
}

/// Lot store over a single CSV file
#[derive(Debug, Clone)]
pub struct CsvLotStore {
    path: PathBuf,
}

impl CsvLotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<PurchaseLot>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to open lot table at {:?}", self.path))?;
        let mut lots = Vec::new();
        for row in reader.deserialize::<LotRow>() {
            let row = row.with_context(|| format!("malformed row in {:?}", self.path))?;
            lots.push(row.into_lot()?);
        }
        Ok(lots)
    }

    fn write_rows(&self, lots: &[PurchaseLot]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PortfolioError::StoreUnavailable(e.to_string()))?;
        }
        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|e| PortfolioError::StoreUnavailable(e.to_string()))?;
        for lot in lots {
            writer
                .serialize(LotRow::from(lot))
                .map_err(|e| PortfolioError::StoreUnavailable(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| PortfolioError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }
}

impl LotStore for CsvLotStore {
    fn read_all(&self) -> Result<Vec<PurchaseLot>> {
        // A missing file is a fresh install, not a failure
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        self.read_rows()
    }

    fn append_and_persist(&self, lot: PurchaseLot) -> Result<()> {
        // Read-concatenate-rewrite. Not atomic: a concurrent writer between
        // the read and the write loses its row. See LotStore::append_and_persist.
        let mut lots = self.read_all()?;
        lots.push(lot);
        self.write_rows(&lots)?;
        info!("Persisted lot table with {} rows to {:?}", lots.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::normalize;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, CsvLotStore) {
        let dir = TempDir::new().unwrap();
        let store = CsvLotStore::new(dir.path().join("lots.csv"));
        (dir, store)
    }

    fn lot(ticker: &str, price: Decimal, quantity: u32) -> PurchaseLot {
        let ticker = normalize(ticker).unwrap();
        let category = crate::ticker::classify(&ticker);
        PurchaseLot::new(ticker, price, quantity, category, None).unwrap()
    }

    #[test]
    fn missing_file_reads_as_empty_table() {
        let (_dir, store) = temp_store();
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn lot_round_trips_field_for_field() {
        let (_dir, store) = temp_store();
        let original = PurchaseLot::new(
            normalize("HGLG11").unwrap(),
            dec!(161.50),
            3,
            AssetCategory::Fii,
            NaiveDate::from_ymd_opt(2026, 3, 14),
        )
        .unwrap();

        store.append_and_persist(original.clone()).unwrap();
        let read_back = store.read_all().unwrap();
        assert_eq!(read_back, vec![original]);
    }

    #[test]
    fn append_preserves_insertion_order() {
        let (_dir, store) = temp_store();
        store.append_and_persist(lot("VALE3", dec!(60), 10)).unwrap();
        store.append_and_persist(lot("HGLG11", dec!(160), 2)).unwrap();
        store.append_and_persist(lot("VALE3", dec!(62), 5)).unwrap();

        let lots = store.read_all().unwrap();
        let tickers: Vec<&str> = lots.iter().map(|l| l.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["VALE3.SA", "HGLG11.SA", "VALE3.SA"]);
    }

    #[test]
    fn malformed_row_is_reported_not_swallowed() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            "ticker,purchase_price,quantity,category,purchase_date\nVALE3.SA,not-a-price,1,STOCK,\n",
        )
        .unwrap();
        assert!(store.read_all().is_err());
    }
}
