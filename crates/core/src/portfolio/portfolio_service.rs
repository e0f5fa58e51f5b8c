//! Portfolio service - the trading operations.
//!
//! Each operation takes one consistent snapshot of {user, fund, position}
//! inside a single database transaction, checks its preconditions against
//! that snapshot, and applies the balance and position writes together. A
//! precondition failure returns before any write, so a committed operation
//! is always all-or-nothing.

use log::debug;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::portfolio_errors::PortfolioError;
use super::portfolio_model::{
    min_share_quantity, NewPosition, OpenPositionRequest, PortfolioSummary, PositionView,
    SaleProceeds, TradeAction, TradeRequest,
};
use super::portfolio_traits::{PortfolioServiceTrait, PositionRepositoryTrait};
use super::valuation;
use crate::constants::{DECIMAL_PRECISION, MIN_SHARE_QUANTITY};
use crate::db::DbTransactionExecutor;
use crate::errors::{Result, ValidationError};
use crate::funds::FundRepositoryTrait;
use crate::users::UserRepositoryTrait;
use crate::Error;

/// Service for trading positions against the fund catalog (Generic over
/// Executor)
pub struct PortfolioService<E: DbTransactionExecutor + Send + Sync + Clone> {
    position_repository: Arc<dyn PositionRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
    fund_repository: Arc<dyn FundRepositoryTrait>,
    transaction_executor: E,
}

impl<E: DbTransactionExecutor + Send + Sync + Clone> PortfolioService<E> {
    /// Creates a new PortfolioService instance
    pub fn new(
        position_repository: Arc<dyn PositionRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
        fund_repository: Arc<dyn FundRepositoryTrait>,
        transaction_executor: E,
    ) -> Self {
        Self {
            position_repository,
            user_repository,
            fund_repository,
            transaction_executor,
        }
    }
}

/// Rounds a requested share quantity to storage precision and rejects
/// amounts below the minimum tradeable quantity.
fn normalize_shares(shares: Decimal) -> Result<Decimal> {
    let normalized = shares.round_dp(DECIMAL_PRECISION);
    if normalized < min_share_quantity() {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Shares must be at least {}",
            MIN_SHARE_QUANTITY
        ))));
    }
    Ok(normalized)
}

#[async_trait::async_trait]
impl<E: DbTransactionExecutor + Send + Sync + Clone> PortfolioServiceTrait for PortfolioService<E> {
    /// Opens a new position for the user in the fund matching the requested
    /// symbol
    async fn open_position(
        &self,
        user_id: &str,
        request: OpenPositionRequest,
    ) -> Result<PositionView> {
        request.validate()?;
        let shares = normalize_shares(request.shares)?;
        let symbol = request.symbol.trim().to_string();
        debug!("Opening position for user {} in {}", user_id, symbol);

        // Clones for the transaction closure
        let position_repository = self.position_repository.clone();
        let user_repository = self.user_repository.clone();
        let fund_repository = self.fund_repository.clone();
        let executor = self.transaction_executor.clone();
        let user_id = user_id.to_string();

        executor.execute(move |tx_conn| -> Result<PositionView> {
            let fund = fund_repository
                .find_by_symbol_in_transaction(&symbol, tx_conn)?
                .ok_or_else(|| PortfolioError::FundNotFound(symbol.clone()))?;

            if position_repository
                .find_by_user_and_symbol_in_transaction(&user_id, &fund.symbol, tx_conn)?
                .is_some()
            {
                return Err(PortfolioError::PositionExists.into());
            }

            let user = user_repository.get_by_id_in_transaction(&user_id, tx_conn)?;
            let cost = (shares * fund.current_price).round_dp(DECIMAL_PRECISION);
            if user.balance < cost {
                return Err(PortfolioError::InsufficientFunds.into());
            }

            let position = position_repository.create_in_transaction(
                NewPosition {
                    id: None,
                    user_id: user.id.clone(),
                    // Store the fund's canonical casing, not the caller's
                    symbol: fund.symbol.clone(),
                    shares,
                    purchase_price: fund.current_price,
                },
                tx_conn,
            )?;
            user_repository.set_balance_in_transaction(&user.id, user.balance - cost, tx_conn)?;

            Ok(valuation::enrich(position, Some(fund)))
        })
    }

    /// Buys into or sells down an existing position
    async fn trade_position(
        &self,
        user_id: &str,
        position_id: &str,
        request: TradeRequest,
    ) -> Result<PositionView> {
        request.validate()?;
        let shares = normalize_shares(request.shares)?;
        debug!(
            "Trading position {} for user {}: {:?} {}",
            position_id, user_id, request.action, shares
        );

        // Clones for the transaction closure
        let position_repository = self.position_repository.clone();
        let user_repository = self.user_repository.clone();
        let fund_repository = self.fund_repository.clone();
        let executor = self.transaction_executor.clone();
        let user_id = user_id.to_string();
        let position_id = position_id.to_string();
        let action = request.action;

        executor.execute(move |tx_conn| -> Result<PositionView> {
            let position = position_repository
                .find_for_user_in_transaction(&position_id, &user_id, tx_conn)?
                .ok_or(PortfolioError::PositionNotFound)?;

            let fund = fund_repository
                .find_by_symbol_in_transaction(&position.symbol, tx_conn)?
                .ok_or(PortfolioError::FundMissingForPosition)?;

            let user = user_repository.get_by_id_in_transaction(&user_id, tx_conn)?;

            match action {
                TradeAction::Buy => {
                    let cost = (shares * fund.current_price).round_dp(DECIMAL_PRECISION);
                    if user.balance < cost {
                        return Err(PortfolioError::InsufficientFunds.into());
                    }

                    let new_shares = position.shares + shares;
                    let new_price = valuation::weighted_average_price(
                        position.shares,
                        position.purchase_price,
                        shares,
                        fund.current_price,
                    )
                    .round_dp(DECIMAL_PRECISION);

                    let updated = position_repository.update_in_transaction(
                        &position.id,
                        new_shares,
                        new_price,
                        tx_conn,
                    )?;
                    user_repository.set_balance_in_transaction(
                        &user.id,
                        user.balance - cost,
                        tx_conn,
                    )?;

                    Ok(valuation::enrich(updated, Some(fund)))
                }
                TradeAction::Sell => {
                    if shares > position.shares {
                        return Err(PortfolioError::InsufficientShares.into());
                    }

                    let proceeds = (shares * fund.current_price).round_dp(DECIMAL_PRECISION);
                    let remaining = position.shares - shares;

                    // Selling every share closes the position: the row is
                    // deleted rather than left at zero shares.
                    let resulting = if remaining.is_zero() {
                        position_repository.delete_in_transaction(&position.id, tx_conn)?;
                        let mut closed = position;
                        closed.shares = Decimal::ZERO;
                        closed
                    } else {
                        position_repository.update_in_transaction(
                            &position.id,
                            remaining,
                            position.purchase_price,
                            tx_conn,
                        )?
                    };
                    user_repository.set_balance_in_transaction(
                        &user.id,
                        user.balance + proceeds,
                        tx_conn,
                    )?;

                    Ok(valuation::enrich(resulting, Some(fund)))
                }
            }
        })
    }

    /// Sells all shares of a position, credits the proceeds, and deletes the
    /// row
    async fn close_position(&self, user_id: &str, position_id: &str) -> Result<SaleProceeds> {
        debug!("Closing position {} for user {}", position_id, user_id);

        // Clones for the transaction closure
        let position_repository = self.position_repository.clone();
        let user_repository = self.user_repository.clone();
        let fund_repository = self.fund_repository.clone();
        let executor = self.transaction_executor.clone();
        let user_id = user_id.to_string();
        let position_id = position_id.to_string();

        executor.execute(move |tx_conn| -> Result<SaleProceeds> {
            let position = position_repository
                .find_for_user_in_transaction(&position_id, &user_id, tx_conn)?
                .ok_or(PortfolioError::PositionNotFound)?;

            let fund = fund_repository
                .find_by_symbol_in_transaction(&position.symbol, tx_conn)?
                .ok_or(PortfolioError::FundMissingForPosition)?;

            let user = user_repository.get_by_id_in_transaction(&user_id, tx_conn)?;

            let proceeds = (position.shares * fund.current_price).round_dp(DECIMAL_PRECISION);
            position_repository.delete_in_transaction(&position.id, tx_conn)?;
            user_repository.set_balance_in_transaction(
                &user.id,
                user.balance + proceeds,
                tx_conn,
            )?;

            Ok(SaleProceeds {
                message: "Position sold successfully".to_string(),
                sale_value: proceeds,
            })
        })
    }

    /// Retrieves a single position with its valuation
    fn get_position(&self, user_id: &str, position_id: &str) -> Result<PositionView> {
        let position = self
            .position_repository
            .find_by_id(position_id)?
            .filter(|position| position.user_id == user_id)
            .ok_or(PortfolioError::PositionNotFound)?;

        let fund = self.fund_repository.find_by_symbol(&position.symbol)?;
        Ok(valuation::enrich(position, fund))
    }

    /// Builds the aggregate portfolio summary for a user
    fn get_summary(&self, user_id: &str) -> Result<PortfolioSummary> {
        let user = self.user_repository.get_by_id(user_id)?;
        let positions = self.position_repository.list_for_user(user_id)?;

        let mut holdings = Vec::with_capacity(positions.len());
        for position in positions {
            let fund = self.fund_repository.find_by_symbol(&position.symbol)?;
            holdings.push(valuation::enrich(position, fund));
        }

        Ok(valuation::summarize(user.balance, holdings))
    }
}
