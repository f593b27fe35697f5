use anyhow::Result;
use clap::Parser;

use carteira::cli::{Cli, Commands};
use carteira::config::Config;
use carteira::dispatcher;
use carteira::pricing::{OfflineQuotes, YahooQuotes};
use carteira::store::CsvLotStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;
    let store = CsvLotStore::new(config.data_file.clone());

    // Allow disabling live price fetching via env var (used by tests and
    // offline runs); every quote then degrades to a zero price.
    let skip_price_fetch = std::env::var("CARTEIRA_SKIP_PRICE_FETCH")
        .map(|v| v != "0")
        .unwrap_or(false);

    match cli.command {
        Commands::Add {
            ticker,
            price,
            quantity,
            date,
        } => dispatcher::dispatch_add(&store, &ticker, &price, quantity, date.as_deref()),

        Commands::Dashboard => {
            if skip_price_fetch {
                dispatcher::dispatch_dashboard(&store, &OfflineQuotes, cli.json).await
            } else {
                let quotes = YahooQuotes::new(config.quote_timeout)?;
                dispatcher::dispatch_dashboard(&store, &quotes, cli.json).await
            }
        }

        Commands::Detail { ticker } => dispatcher::dispatch_detail(&store, &ticker),

        Commands::Suggest => {
            if skip_price_fetch {
                dispatcher::dispatch_suggest(&store, &OfflineQuotes, cli.json).await
            } else {
                let quotes = YahooQuotes::new(config.quote_timeout)?;
                dispatcher::dispatch_suggest(&store, &quotes, cli.json).await
            }
        }
    }
}
