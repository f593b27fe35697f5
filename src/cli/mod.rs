use clap::{Parser, Subcommand};

pub mod formatters;

#[derive(Parser)]
#[command(name = "carteira")]
#[command(version, about = "Personal B3 portfolio tracker with rebalancing suggestions")]
#[command(
    long_about = "Record purchase lots (stocks and FIIs), view consolidated holdings with live \
                  prices, and get equal-weight rebalancing suggestions."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new purchase lot (ticker is normalized and categorized automatically)
    Add {
        /// Ticker symbol (e.g. VALE3, HGLG11)
        ticker: String,

        /// Purchase price per unit
        price: String,

        /// Quantity of shares/quotas (at least 1)
        quantity: u32,

        /// Purchase date (YYYY-MM-DD, informational)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show consolidated holdings with live prices and P&L
    Dashboard,

    /// Show weighted average price and purchase history for one ticker
    Detail {
        /// Ticker symbol
        ticker: String,
    },

    /// Suggest rebalancing actions toward an equal-weight allocation
    Suggest,
}
