//! Carteira - personal B3 portfolio tracker
//!
//! Records purchase lots into a flat CSV table, consolidates them into
//! per-ticker positions with live quotes, and suggests rebalancing actions
//! toward an equal-weight allocation.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod pricing;
pub mod reports;
pub mod store;
pub mod ticker;
pub mod utils;
