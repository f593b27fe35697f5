//! Rebalancing advisor
//!
//! Compares each position's share of total market value against an
//! equal-weight target and emits a buy/wait recommendation. Pure and
//! deterministic; no I/O.

use rust_decimal::Decimal;

use crate::error::PortfolioError;
use crate::ticker::NormalizedTicker;

use super::portfolio::Position;

/// Suggested action for one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Underweight: below the equal-weight target
    Buy,
    /// At or above target
    Wait,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Wait => "WAIT",
        }
    }
}

/// One recommendation per position, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub ticker: NormalizedTicker,
    pub action: Action,
    /// Share of total market value this position holds now (0..=1)
    pub current_share: Decimal,
    /// Equal-weight target share (0..=1)
    pub target_share: Decimal,
    /// (target - current) in percentage points; positive means underweight
    pub gap_pct: Decimal,
}

/// Compare positions against the equal-weight target.
///
/// The only allocation policy is equal weight across distinct tickers:
/// target = 1 / position count. A position exactly at target (gap 0) resolves
/// to Wait. Undefined-arithmetic states are rejected rather than producing
/// NaN-like garbage: no positions at all, or a portfolio where every price
/// lookup failed and the total valuation is zero.
pub fn suggest(positions: &[Position]) -> Result<Vec<Recommendation>, PortfolioError> {
    if positions.is_empty() {
        return Err(PortfolioError::EmptyPortfolio);
    }

    let total_value: Decimal = positions.iter().map(|p| p.market_value).sum();
    if total_value == Decimal::ZERO {
        return Err(PortfolioError::ZeroValuation);
    }

    let target_share = Decimal::ONE / Decimal::from(positions.len() as u64);
    let hundred = Decimal::from(100);

    Ok(positions
        .iter()
        .map(|position| {
            let current_share = position.market_value / total_value;
            let gap = target_share - current_share;
            let action = if gap > Decimal::ZERO {
                Action::Buy
            } else {
                Action::Wait
            };
            Recommendation {
                ticker: position.ticker.clone(),
                action,
                current_share,
                target_share,
                gap_pct: gap * hundred,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::{classify, normalize};
    use rust_decimal_macros::dec;

    fn position(ticker: &str, market_value: Decimal) -> Position {
        let ticker = normalize(ticker).unwrap();
        let category = classify(&ticker);
        Position {
            ticker,
            category,
            weighted_average_price: dec!(1),
            total_quantity: 1,
            current_price: market_value,
            market_value,
            unrealized_pnl: Decimal::ZERO,
        }
    }

    #[test]
    fn single_position_always_waits() {
        let recs = suggest(&[position("VALE3", dec!(500))]).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].action, Action::Wait);
        assert_eq!(recs[0].current_share, Decimal::ONE);
        assert_eq!(recs[0].target_share, Decimal::ONE);
        assert_eq!(recs[0].gap_pct, Decimal::ZERO);
    }

    #[test]
    fn underweight_buys_overweight_waits() {
        let recs = suggest(&[
            position("VALE3", dec!(100)),
            position("HGLG11", dec!(300)),
        ])
        .unwrap();

        assert_eq!(recs[0].action, Action::Buy);
        assert_eq!(recs[0].current_share, dec!(0.25));
        assert_eq!(recs[0].target_share, dec!(0.5));
        assert_eq!(recs[0].gap_pct, dec!(25.0));

        assert_eq!(recs[1].action, Action::Wait);
        assert_eq!(recs[1].current_share, dec!(0.75));
        assert_eq!(recs[1].gap_pct, dec!(-25.0));
    }

    #[test]
    fn output_follows_input_order() {
        let recs = suggest(&[
            position("ZZZZ3", dec!(10)),
            position("AAAA3", dec!(20)),
        ])
        .unwrap();
        assert_eq!(recs[0].ticker.as_str(), "ZZZZ3.SA");
        assert_eq!(recs[1].ticker.as_str(), "AAAA3.SA");
    }

    #[test]
    fn exact_equal_split_resolves_to_wait() {
        let recs = suggest(&[
            position("VALE3", dec!(100)),
            position("PETR4", dec!(100)),
        ])
        .unwrap();
        assert!(recs.iter().all(|r| r.action == Action::Wait));
        assert!(recs.iter().all(|r| r.gap_pct == Decimal::ZERO));
    }

    #[test]
    fn empty_portfolio_is_rejected() {
        assert!(matches!(suggest(&[]), Err(PortfolioError::EmptyPortfolio)));
    }

    #[test]
    fn zero_valuation_is_rejected() {
        // All quote lookups failed: every market value degraded to zero
        let positions = vec![
            position("VALE3", Decimal::ZERO),
            position("HGLG11", Decimal::ZERO),
        ];
        assert!(matches!(
            suggest(&positions),
            Err(PortfolioError::ZeroValuation)
        ));
    }

    #[test]
    fn zero_valued_position_in_a_live_portfolio_is_a_buy() {
        let recs = suggest(&[
            position("VALE3", dec!(200)),
            position("XPTO3", Decimal::ZERO),
        ])
        .unwrap();
        assert_eq!(recs[1].action, Action::Buy);
        assert_eq!(recs[1].current_share, Decimal::ZERO);
    }

    #[test]
    fn categories_do_not_affect_the_target() {
        // Equal weight is across distinct tickers, not categories
        let recs = suggest(&[
            position("VALE3", dec!(100)),
            position("PETR4", dec!(100)),
            position("HGLG11", dec!(100)),
        ])
        .unwrap();
        for rec in &recs {
            assert_eq!(rec.target_share, Decimal::ONE / dec!(3));
            assert_eq!(rec.action, Action::Wait);
        }
    }
}
