//! Portfolio error types.
//!
//! Every variant maps to a precondition of one of the four portfolio
//! operations. The Display strings are part of the API contract and are
//! returned verbatim to callers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    /// The requested symbol does not resolve to any fund. Echoes the symbol
    /// exactly as the caller supplied it.
    #[error("Index fund with symbol \"{0}\" not found")]
    FundNotFound(String),

    /// A held position references a symbol that no longer resolves to a fund.
    #[error("Index fund not found for this position")]
    FundMissingForPosition,

    /// The position does not exist or belongs to another user. The two cases
    /// are indistinguishable on purpose.
    #[error("Position not found")]
    PositionNotFound,

    /// An open position for this (user, symbol) pair already exists.
    #[error("Position already exists. Use PUT to buy more.")]
    PositionExists,

    /// The cash balance does not cover the cost of the buy.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// The sell asks for more shares than the position holds.
    #[error("Insufficient shares to sell")]
    InsufficientShares,
}

impl From<PortfolioError> for String {
    fn from(error: PortfolioError) -> Self {
        error.to_string()
    }
}
