//! Portfolio repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::portfolio_model::{
    NewPosition, OpenPositionRequest, PortfolioSummary, Position, PositionView, SaleProceeds,
    TradeRequest,
};
use crate::db::DbConnection;
use crate::errors::Result;

/// Trait defining the contract for Position repository operations.
///
/// Reads used by the trading operations run inside the same transaction as
/// the writes they guard, so every precondition is checked against the state
/// the mutation will commit on top of.
pub trait PositionRepositoryTrait: Send + Sync {
    /// Retrieves a position by ID, regardless of owner.
    fn find_by_id(&self, position_id: &str) -> Result<Option<Position>>;

    /// Lists a user's positions ordered by symbol.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Position>>;

    /// Retrieves a position by ID and owner inside an open transaction.
    fn find_for_user_in_transaction(
        &self,
        position_id: &str,
        user_id: &str,
        conn: &mut DbConnection,
    ) -> Result<Option<Position>>;

    /// Finds a user's position for a symbol inside an open transaction,
    /// matching the symbol case-insensitively.
    fn find_by_user_and_symbol_in_transaction(
        &self,
        user_id: &str,
        symbol: &str,
        conn: &mut DbConnection,
    ) -> Result<Option<Position>>;

    /// Creates a position row inside an open transaction.
    fn create_in_transaction(
        &self,
        new_position: NewPosition,
        conn: &mut DbConnection,
    ) -> Result<Position>;

    /// Overwrites a position's share count and cost basis inside an open
    /// transaction.
    fn update_in_transaction(
        &self,
        position_id: &str,
        shares: Decimal,
        purchase_price: Decimal,
        conn: &mut DbConnection,
    ) -> Result<Position>;

    /// Deletes a position row inside an open transaction.
    ///
    /// Returns the number of deleted records.
    fn delete_in_transaction(&self, position_id: &str, conn: &mut DbConnection) -> Result<usize>;
}

/// Trait defining the contract for portfolio service operations.
///
/// The four trading operations (open, buy, sell, close) are the only code
/// paths that mutate a user's balance, and each runs as a single atomic
/// transaction.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Opens a new position: resolves the fund, debits the cash balance, and
    /// creates the position row.
    async fn open_position(
        &self,
        user_id: &str,
        request: OpenPositionRequest,
    ) -> Result<PositionView>;

    /// Buys into or sells down an existing position.
    async fn trade_position(
        &self,
        user_id: &str,
        position_id: &str,
        request: TradeRequest,
    ) -> Result<PositionView>;

    /// Sells all shares of a position and deletes it.
    async fn close_position(&self, user_id: &str, position_id: &str) -> Result<SaleProceeds>;

    /// Retrieves a single position with its valuation.
    fn get_position(&self, user_id: &str, position_id: &str) -> Result<PositionView>;

    /// Builds the aggregate portfolio summary for a user.
    fn get_summary(&self, user_id: &str) -> Result<PortfolioSummary>;
}
