//! Index fund service.

use log::debug;
use std::sync::Arc;

use super::funds_model::{FundSearchResponse, IndexFund, IndexFundUpdate, NewIndexFund};
use super::funds_traits::{FundRepositoryTrait, FundServiceTrait};
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::db::DbTransactionExecutor;
use crate::errors::{DatabaseError, Error, Result, ValidationError};

/// Service for managing the index fund catalog (Generic over Executor)
pub struct FundService<E: DbTransactionExecutor + Send + Sync + Clone> {
    repository: Arc<dyn FundRepositoryTrait>,
    transaction_executor: E,
}

/// Catalog writes carry the canonical casing, so lowercase symbols are
/// rejected rather than silently normalized.
fn require_uppercase_symbol(symbol: &str) -> Result<()> {
    if symbol.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Fund symbol must be uppercase".to_string(),
        )));
    }
    Ok(())
}

impl<E: DbTransactionExecutor + Send + Sync + Clone> FundService<E> {
    /// Creates a new FundService instance
    pub fn new(repository: Arc<dyn FundRepositoryTrait>, transaction_executor: E) -> Self {
        Self {
            repository,
            transaction_executor,
        }
    }
}

#[async_trait::async_trait]
impl<E: DbTransactionExecutor + Send + Sync + Clone> FundServiceTrait for FundService<E> {
    /// Retrieves a fund by ID
    fn get_fund(&self, fund_id: &str) -> Result<IndexFund> {
        (*self.repository).get_by_id(fund_id)
    }

    /// Finds a fund by symbol, matching case-insensitively
    fn get_fund_by_symbol(&self, symbol: &str) -> Result<Option<IndexFund>> {
        (*self.repository).find_by_symbol(symbol)
    }

    /// Lists funds ordered by name, clamping the page size to its maximum
    fn search_funds(
        &self,
        symbol_filter: Option<String>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<FundSearchResponse> {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (*self.repository).search(symbol_filter, page, page_size)
    }

    /// Creates a new fund. The submitted symbol is the canonical casing, so
    /// it has to arrive uppercase.
    async fn create_fund(&self, new_fund: NewIndexFund) -> Result<IndexFund> {
        new_fund.validate()?;

        let mut new_fund = new_fund;
        new_fund.symbol = new_fund.symbol.trim().to_string();
        require_uppercase_symbol(&new_fund.symbol)?;
        debug!("Creating index fund {}", new_fund.symbol);

        // Clones for the transaction closure
        let repository_for_tx = self.repository.clone();
        let executor_for_tx = self.transaction_executor.clone();

        executor_for_tx.execute(move |tx_conn| {
            // Explicit check ahead of the unique index for a clean error
            if repository_for_tx
                .find_by_symbol_in_transaction(&new_fund.symbol, tx_conn)?
                .is_some()
            {
                return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                    "Index fund with symbol \"{}\" already exists",
                    new_fund.symbol
                ))));
            }
            repository_for_tx.create_in_transaction(new_fund, tx_conn)
        })
    }

    /// Applies a partial update, guarding symbol uniqueness
    async fn update_fund(&self, fund_id: &str, update: IndexFundUpdate) -> Result<IndexFund> {
        update.validate()?;

        let mut update = update;
        if let Some(symbol) = update.symbol.take() {
            let symbol = symbol.trim().to_string();
            require_uppercase_symbol(&symbol)?;
            update.symbol = Some(symbol);
        }

        // Clones for the transaction closure
        let repository_for_tx = self.repository.clone();
        let executor_for_tx = self.transaction_executor.clone();
        let fund_id = fund_id.to_string();

        executor_for_tx.execute(move |tx_conn| {
            if let Some(symbol) = &update.symbol {
                if let Some(existing) =
                    repository_for_tx.find_by_symbol_in_transaction(symbol, tx_conn)?
                {
                    if existing.id != fund_id {
                        return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                            "Index fund with symbol \"{}\" already exists",
                            symbol
                        ))));
                    }
                }
            }
            repository_for_tx.update_in_transaction(&fund_id, update, tx_conn)
        })
    }

    /// Deletes a fund by ID
    async fn delete_fund(&self, fund_id: &str) -> Result<()> {
        // Clones for the transaction closure
        let repository_for_tx = self.repository.clone();
        let executor_for_tx = self.transaction_executor.clone();
        let fund_id = fund_id.to_string();

        executor_for_tx.execute(move |tx_conn| {
            let deleted = repository_for_tx.delete_in_transaction(&fund_id, tx_conn)?;
            if deleted == 0 {
                return Err(Error::Database(DatabaseError::NotFound(
                    "Index fund not found".to_string(),
                )));
            }
            Ok(())
        })
    }
}
