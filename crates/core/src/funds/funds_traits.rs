//! Index fund repository and service traits.

use async_trait::async_trait;

use super::funds_model::{FundSearchResponse, IndexFund, IndexFundUpdate, NewIndexFund};
use crate::db::DbConnection;
use crate::errors::Result;

/// Trait defining the contract for IndexFund repository operations.
pub trait FundRepositoryTrait: Send + Sync {
    /// Retrieves a fund by ID.
    fn get_by_id(&self, fund_id: &str) -> Result<IndexFund>;

    /// Finds a fund by symbol, matching case-insensitively.
    fn find_by_symbol(&self, symbol: &str) -> Result<Option<IndexFund>>;

    /// Finds a fund by symbol inside an open transaction.
    fn find_by_symbol_in_transaction(
        &self,
        symbol: &str,
        conn: &mut DbConnection,
    ) -> Result<Option<IndexFund>>;

    /// Lists funds ordered by name, with an optional symbol substring filter.
    ///
    /// `page` is 1-based; the caller is responsible for clamping `page_size`.
    fn search(
        &self,
        symbol_filter: Option<String>,
        page: i64,
        page_size: i64,
    ) -> Result<FundSearchResponse>;

    /// Creates a new fund inside an open transaction.
    fn create_in_transaction(
        &self,
        new_fund: NewIndexFund,
        conn: &mut DbConnection,
    ) -> Result<IndexFund>;

    /// Applies a partial update inside an open transaction.
    fn update_in_transaction(
        &self,
        fund_id: &str,
        update: IndexFundUpdate,
        conn: &mut DbConnection,
    ) -> Result<IndexFund>;

    /// Deletes a fund inside an open transaction.
    ///
    /// Returns the number of deleted records.
    fn delete_in_transaction(&self, fund_id: &str, conn: &mut DbConnection) -> Result<usize>;
}

/// Trait defining the contract for IndexFund service operations.
#[async_trait]
pub trait FundServiceTrait: Send + Sync {
    /// Retrieves a fund by ID.
    fn get_fund(&self, fund_id: &str) -> Result<IndexFund>;

    /// Finds a fund by symbol, matching case-insensitively.
    fn get_fund_by_symbol(&self, symbol: &str) -> Result<Option<IndexFund>>;

    /// Lists funds ordered by name with pagination defaults applied.
    fn search_funds(
        &self,
        symbol_filter: Option<String>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<FundSearchResponse>;

    /// Creates a new fund with business validation.
    async fn create_fund(&self, new_fund: NewIndexFund) -> Result<IndexFund>;

    /// Applies a partial update with business validation.
    async fn update_fund(&self, fund_id: &str, update: IndexFundUpdate) -> Result<IndexFund>;

    /// Deletes a fund by ID.
    async fn delete_fund(&self, fund_id: &str) -> Result<()>;
}
