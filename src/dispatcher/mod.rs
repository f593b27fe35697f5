//! Command handlers
//!
//! Each handler performs one store read, at most one quote pass, and one
//! render. Store-read failures degrade to an empty table so views always
//! render something; write failures and advisor errors surface to the caller.

use anyhow::Context;
use chrono::NaiveDate;
use colored::Colorize;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use crate::cli::formatters;
use crate::error::{PortfolioError, Result};
use crate::pricing::QuoteSource;
use crate::reports;
use crate::store::{LotStore, PurchaseLot};
use crate::ticker;

/// Record a new purchase lot ("novo aporte").
pub fn dispatch_add<S: LotStore>(
    store: &S,
    raw_ticker: &str,
    raw_price: &str,
    quantity: u32,
    raw_date: Option<&str>,
) -> Result<()> {
    let normalized = ticker::normalize(raw_ticker)?;
    let category = ticker::classify(&normalized);

    let price = Decimal::from_str(raw_price.trim())
        .map_err(|_| PortfolioError::Validation(format!("invalid price '{}'", raw_price)))?;

    let purchase_date = raw_date
        .map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| PortfolioError::Validation(format!("invalid date '{}'", d)))
        })
        .transpose()?;

    let lot = PurchaseLot::new(normalized.clone(), price, quantity, category, purchase_date)?;

    store
        .append_and_persist(lot)
        .with_context(|| format!("failed to persist lot for {}", normalized))?;

    println!(
        "{} Recorded {} x {} @ {} ({})",
        "✓".green().bold(),
        quantity,
        normalized.as_str().bold(),
        crate::utils::format_currency(price),
        category.as_str()
    );
    Ok(())
}

/// Show consolidated holdings with live prices and dashboard totals.
pub async fn dispatch_dashboard<S: LotStore, Q: QuoteSource>(
    store: &S,
    quotes: &Q,
    json_output: bool,
) -> Result<()> {
    let lots = read_lots_degraded(store);
    if lots.is_empty() && !json_output {
        println!("{}", formatters::format_empty_portfolio());
        return Ok(());
    }

    let report = reports::aggregate_report(&lots, quotes).await;

    if json_output {
        println!("{}", formatters::format_dashboard_json(&report));
    } else {
        println!("{}", formatters::format_dashboard_table(&report));
    }
    Ok(())
}

/// Show one ticker's consolidated figures and purchase history. No quotes.
pub fn dispatch_detail<S: LotStore>(store: &S, raw_ticker: &str) -> Result<()> {
    let normalized = ticker::normalize(raw_ticker)?;

    let lots: Vec<PurchaseLot> = read_lots_degraded(store)
        .into_iter()
        .filter(|lot| lot.ticker == normalized)
        .collect();

    let Some((weighted_average, total_quantity, category)) =
        reports::portfolio::consolidate_lots(&lots)
    else {
        println!(
            "{} No lots recorded for {}.",
            "ℹ".blue().bold(),
            normalized.as_str().bold()
        );
        return Ok(());
    };

    println!(
        "{}",
        formatters::format_detail(
            normalized.as_str(),
            weighted_average,
            total_quantity,
            category,
            &lots
        )
    );
    Ok(())
}

/// Compare current allocation against the equal-weight target.
///
/// Advisor errors (empty portfolio, zero valuation) are surfaced, not masked:
/// a silently wrong percentage is worse than "not yet available".
pub async fn dispatch_suggest<S: LotStore, Q: QuoteSource>(
    store: &S,
    quotes: &Q,
    json_output: bool,
) -> Result<()> {
    let lots = read_lots_degraded(store);
    let positions = reports::aggregate(&lots, quotes).await;
    let recommendations = reports::suggest(&positions)?;

    if json_output {
        println!("{}", formatters::format_suggestions_json(&recommendations));
    } else {
        println!(
            "{}",
            formatters::format_suggestions_table(&recommendations)
        );
    }
    Ok(())
}

/// Read the lot table, degrading any failure to an empty table so the view
/// still renders. Write paths never use this.
fn read_lots_degraded<S: LotStore>(store: &S) -> Vec<PurchaseLot> {
    match store.read_all() {
        Ok(lots) => lots,
        Err(e) => {
            warn!("lot table read failed ({}); rendering empty portfolio", e);
            Vec::new()
        }
    }
}
