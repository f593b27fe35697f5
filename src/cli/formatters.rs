//! Output formatting module for CLI display
//!
//! Handles all terminal output formatting, separating data calculation from
//! presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::reports::{PortfolioReport, Recommendation};
use crate::store::PurchaseLot;
use crate::ticker::AssetCategory;
use crate::utils::{format_currency, format_share, format_signed_percent};

pub fn format_empty_portfolio() -> String {
    format!(
        "{} No lots recorded yet. Record your first purchase with `carteira add`.",
        "ℹ".blue().bold()
    )
}

/// Format the dashboard for terminal table output
pub fn format_dashboard_table(report: &PortfolioReport) -> String {
    #[derive(Tabled)]
    struct PositionRow {
        #[tabled(rename = "Ticker")]
        ticker: String,
        #[tabled(rename = "Category")]
        category: &'static str,
        #[tabled(rename = "Quantity")]
        quantity: u64,
        #[tabled(rename = "Avg Price")]
        avg_price: String,
        #[tabled(rename = "Price")]
        price: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "P&L")]
        pnl: String,
    }

    let rows: Vec<PositionRow> = report
        .positions
        .iter()
        .map(|p| PositionRow {
            ticker: p.ticker.as_str().to_string(),
            category: p.category.as_str(),
            quantity: p.total_quantity,
            avg_price: format_currency(p.weighted_average_price),
            price: format_currency(p.current_price),
            value: format_currency(p.market_value),
            pnl: colorize_pnl(p.unrealized_pnl),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .modify(Columns::new(2..), Alignment::right())
        .to_string();

    format!(
        "\n{} Portfolio Dashboard\n\n{}\n\n  Total value: {}\n  Total P&L:   {}\n",
        "📊".cyan().bold(),
        table,
        format_currency(report.total_value).cyan().bold(),
        colorize_pnl(report.total_pnl),
    )
}

/// Format the dashboard for JSON output
pub fn format_dashboard_json(report: &PortfolioReport) -> String {
    #[derive(Serialize)]
    struct JsonPosition {
        ticker: String,
        category: String,
        quantity: u64,
        weighted_average_price: String,
        current_price: String,
        market_value: String,
        unrealized_pnl: String,
    }

    #[derive(Serialize)]
    struct JsonReport {
        positions: Vec<JsonPosition>,
        total_value: String,
        total_pnl: String,
    }

    let positions = report
        .positions
        .iter()
        .map(|p| JsonPosition {
            ticker: p.ticker.as_str().to_string(),
            category: p.category.as_str().to_string(),
            quantity: p.total_quantity,
            weighted_average_price: p.weighted_average_price.to_string(),
            current_price: p.current_price.to_string(),
            market_value: p.market_value.to_string(),
            unrealized_pnl: p.unrealized_pnl.to_string(),
        })
        .collect();

    let json_report = JsonReport {
        positions,
        total_value: report.total_value.to_string(),
        total_pnl: report.total_pnl.to_string(),
    };

    serde_json::to_string_pretty(&json_report)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Format the per-asset detail view: consolidated figures plus lot history
pub fn format_detail(
    ticker: &str,
    weighted_average: Decimal,
    total_quantity: u64,
    category: AssetCategory,
    lots: &[PurchaseLot],
) -> String {
    #[derive(Tabled)]
    struct LotRow {
        #[tabled(rename = "Price")]
        price: String,
        #[tabled(rename = "Quantity")]
        quantity: u32,
        #[tabled(rename = "Date")]
        date: String,
    }

    let rows: Vec<LotRow> = lots
        .iter()
        .map(|lot| LotRow {
            price: format_currency(lot.purchase_price),
            quantity: lot.quantity,
            date: lot
                .purchase_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .modify(Columns::new(0..2), Alignment::right())
        .to_string();

    format!(
        "\n{} {} ({})\n\n  Average price: {}\n  Total quantity: {}\n\nPurchase history:\n{}\n",
        "🔎".cyan().bold(),
        ticker.bold(),
        category.as_str(),
        format_currency(weighted_average).cyan(),
        total_quantity,
        table,
    )
}

/// Format rebalancing suggestions for terminal output
pub fn format_suggestions_table(recommendations: &[Recommendation]) -> String {
    #[derive(Tabled)]
    struct SuggestionRow {
        #[tabled(rename = "Ticker")]
        ticker: String,
        #[tabled(rename = "Action")]
        action: String,
        #[tabled(rename = "Current")]
        current: String,
        #[tabled(rename = "Target")]
        target: String,
        #[tabled(rename = "Gap")]
        gap: String,
    }

    let rows: Vec<SuggestionRow> = recommendations
        .iter()
        .map(|r| SuggestionRow {
            ticker: r.ticker.as_str().to_string(),
            action: match r.action {
                crate::reports::Action::Buy => "BUY".green().bold().to_string(),
                crate::reports::Action::Wait => "WAIT".yellow().to_string(),
            },
            current: format_share(r.current_share),
            target: format_share(r.target_share),
            gap: format_signed_percent(r.gap_pct),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .modify(Columns::new(2..), Alignment::right())
        .to_string();

    let mut output = format!(
        "\n{} Rebalancing Suggestions (equal-weight target)\n\n{}\n\n",
        "🎯".cyan().bold(),
        table
    );

    for rec in recommendations {
        match rec.action {
            crate::reports::Action::Buy => output.push_str(&format!(
                "  {} {}: below the equal-weight target, focus new contributions here\n",
                "✅".green(),
                rec.ticker.as_str().bold()
            )),
            crate::reports::Action::Wait => output.push_str(&format!(
                "  {} {}: already a large share of the portfolio, hold off\n",
                "⚠".yellow(),
                rec.ticker.as_str().bold()
            )),
        }
    }

    output
}

/// Format rebalancing suggestions for JSON output
pub fn format_suggestions_json(recommendations: &[Recommendation]) -> String {
    #[derive(Serialize)]
    struct JsonRecommendation {
        ticker: String,
        action: String,
        current_share: String,
        target_share: String,
        gap_pct: String,
    }

    let recs: Vec<JsonRecommendation> = recommendations
        .iter()
        .map(|r| JsonRecommendation {
            ticker: r.ticker.as_str().to_string(),
            action: r.action.as_str().to_string(),
            current_share: r.current_share.to_string(),
            target_share: r.target_share.to_string(),
            gap_pct: r.gap_pct.to_string(),
        })
        .collect();

    serde_json::to_string_pretty(&recs)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

fn colorize_pnl(value: Decimal) -> String {
    let formatted = format_currency(value);
    if value < Decimal::ZERO {
        formatted.red().to_string()
    } else {
        formatted.green().to_string()
    }
}
