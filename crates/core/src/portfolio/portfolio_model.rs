//! Portfolio domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_SHARE_QUANTITY;
use crate::{errors::ValidationError, Error, Result};

/// Returns the smallest share quantity a trade may carry.
pub fn min_share_quantity() -> Decimal {
    Decimal::from_str_radix(MIN_SHARE_QUANTITY, 10).unwrap_or_else(|_| Decimal::new(1, 2))
}

/// Domain model representing one user's stake in one fund.
///
/// At most one position exists per (user, symbol) pair, and `shares` is
/// always positive while the row exists. A sale that would bring `shares`
/// to zero deletes the row instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub user_id: String,
    /// The fund's canonical symbol, regardless of the casing the caller used
    /// when opening the position.
    pub symbol: String,
    /// Share count, two decimal places.
    pub shares: Decimal,
    /// Shares-weighted average price paid across all buys. Unaffected by
    /// partial sales.
    pub purchase_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Internal input model for inserting a position row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub symbol: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
}

/// Request to open a new position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPositionRequest {
    pub symbol: String,
    pub shares: Decimal,
}

impl OpenPositionRequest {
    /// Validates the open request.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        validate_shares(self.shares)
    }
}

/// Direction of a trade against an existing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

/// Request to buy into or sell down an existing position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    pub action: TradeAction,
    pub shares: Decimal,
}

impl TradeRequest {
    /// Validates the trade request.
    pub fn validate(&self) -> Result<()> {
        validate_shares(self.shares)
    }
}

/// Price snapshot of the fund backing a position, embedded in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundSnapshot {
    pub name: String,
    pub symbol: String,
    pub current_price: Decimal,
}

/// A position enriched with its valuation, as returned to callers.
///
/// `index_fund` is None when the backing fund has been deleted; the
/// valuation then falls back to zero rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionView {
    pub id: String,
    pub symbol: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub index_fund: Option<FundSnapshot>,
}

/// Aggregate view of a user's cash and holdings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub balance: Decimal,
    pub total_portfolio_value: Decimal,
    pub total_invested: Decimal,
    pub total_profit_loss: Decimal,
    pub holdings: Vec<PositionView>,
}

/// Outcome of closing a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleProceeds {
    pub message: String,
    pub sale_value: Decimal,
}

fn validate_shares(shares: Decimal) -> Result<()> {
    if shares <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Shares must be greater than zero".to_string(),
        )));
    }
    Ok(())
}
