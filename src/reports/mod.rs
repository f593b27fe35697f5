// Reports module - views recomputed from the lot table on every render

pub mod portfolio;
pub mod rebalance;

pub use portfolio::{aggregate, aggregate_report, PortfolioReport, Position};
pub use rebalance::{suggest, Action, Recommendation};
