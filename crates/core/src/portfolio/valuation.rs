//! Position valuation.
//!
//! Pure functions that price a position against its fund's current price.
//! Nothing here touches storage; the trading operations and the read
//! endpoints both call into this module to shape their responses.

use rust_decimal::Decimal;

use super::portfolio_model::{FundSnapshot, PortfolioSummary, Position, PositionView};
use crate::constants::DECIMAL_PRECISION;
use crate::funds::IndexFund;

/// Computes `(current_value, profit_loss)` for a position.
///
/// When the fund cannot be resolved both values fall back to zero; a deleted
/// fund makes a position worthless on the read path, it does not make the
/// read fail.
pub fn position_value(position: &Position, fund: Option<&IndexFund>) -> (Decimal, Decimal) {
    match fund {
        Some(fund) => {
            let current_value =
                (position.shares * fund.current_price).round_dp(DECIMAL_PRECISION);
            let invested =
                (position.shares * position.purchase_price).round_dp(DECIMAL_PRECISION);
            (current_value, current_value - invested)
        }
        None => (Decimal::ZERO, Decimal::ZERO),
    }
}

/// Computes the full-precision shares-weighted average price after a buy.
///
/// The caller rounds the result when persisting it; keeping the division
/// unrounded here avoids compounding rounding error across repeated buys.
pub fn weighted_average_price(
    held_shares: Decimal,
    held_price: Decimal,
    added_shares: Decimal,
    added_price: Decimal,
) -> Decimal {
    let total_shares = held_shares + added_shares;
    if total_shares.is_zero() {
        return Decimal::ZERO;
    }
    ((held_shares * held_price) + (added_shares * added_price)) / total_shares
}

/// Builds the caller-facing view of a position, with valuation and fund
/// snapshot attached.
pub fn enrich(position: Position, fund: Option<IndexFund>) -> PositionView {
    let (current_value, profit_loss) = position_value(&position, fund.as_ref());
    PositionView {
        id: position.id,
        symbol: position.symbol,
        shares: position.shares,
        purchase_price: position.purchase_price,
        current_value,
        profit_loss,
        index_fund: fund.map(|fund| FundSnapshot {
            name: fund.name,
            symbol: fund.symbol,
            current_price: fund.current_price,
        }),
    }
}

/// Aggregates per-position valuations into the portfolio summary.
pub fn summarize(balance: Decimal, holdings: Vec<PositionView>) -> PortfolioSummary {
    let total_portfolio_value: Decimal = holdings.iter().map(|h| h.current_value).sum();
    let total_invested: Decimal = holdings
        .iter()
        .map(|h| (h.shares * h.purchase_price).round_dp(DECIMAL_PRECISION))
        .sum();

    PortfolioSummary {
        balance,
        total_portfolio_value,
        total_invested,
        total_profit_loss: total_portfolio_value - total_invested,
        holdings,
    }
}
