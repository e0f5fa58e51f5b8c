use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::get_connection;
use crate::schema::index_funds;
use crate::schema::index_funds::dsl::*;

use fundbook_core::errors::Result;
use fundbook_core::funds::{
    FundRepositoryTrait, FundSearchResponse, FundSearchResponseMeta, IndexFund, IndexFundUpdate,
    NewIndexFund,
};

use super::model::{IndexFundDB, IndexFundUpdateDB};

/// Repository for managing the index fund catalog in the database
pub struct FundRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl FundRepository {
    /// Creates a new FundRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl FundRepositoryTrait for FundRepository {
    /// Retrieves a fund by its ID
    fn get_by_id(&self, fund_id: &str) -> Result<IndexFund> {
        let mut conn = get_connection(&self.pool)?;

        let fund = index_funds
            .select(IndexFundDB::as_select())
            .find(fund_id)
            .first::<IndexFundDB>(&mut conn)?;

        Ok(fund.into())
    }

    /// Looks up a fund by ticker symbol.
    ///
    /// The symbol column uses NOCASE collation, so the match is
    /// case-insensitive and the returned fund carries the canonical casing.
    fn find_by_symbol(&self, symbol_param: &str) -> Result<Option<IndexFund>> {
        let mut conn = get_connection(&self.pool)?;

        let fund = index_funds
            .filter(symbol.eq(symbol_param))
            .select(IndexFundDB::as_select())
            .first::<IndexFundDB>(&mut conn)
            .optional()?;

        Ok(fund.map(IndexFund::from))
    }

    fn find_by_symbol_in_transaction(
        &self,
        symbol_param: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Option<IndexFund>> {
        let fund = index_funds
            .filter(symbol.eq(symbol_param))
            .select(IndexFundDB::as_select())
            .first::<IndexFundDB>(conn)
            .optional()?;

        Ok(fund.map(IndexFund::from))
    }

    /// Lists the catalog one page at a time, optionally filtering by a
    /// symbol substring
    fn search(&self, keyword: Option<String>, page: i64, page_size: i64) -> Result<FundSearchResponse> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = index_funds::table.into_boxed();
        let mut count_query = index_funds::table.into_boxed();

        if let Some(kw) = keyword.as_deref().map(str::trim).filter(|kw| !kw.is_empty()) {
            let pattern = format!("%{}%", kw);
            query = query.filter(symbol.like(pattern.clone()));
            count_query = count_query.filter(symbol.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)?;

        let results = query
            .select(IndexFundDB::as_select())
            .order(name.asc())
            .limit(page_size)
            .offset((page - 1) * page_size)
            .load::<IndexFundDB>(&mut conn)?;

        Ok(FundSearchResponse {
            data: results.into_iter().map(IndexFund::from).collect(),
            meta: FundSearchResponseMeta {
                total,
                page,
                page_size,
            },
        })
    }

    /// Creates a new catalog entry within a given database transaction
    fn create_in_transaction(
        &self,
        new_fund: NewIndexFund,
        conn: &mut SqliteConnection,
    ) -> Result<IndexFund> {
        new_fund.validate()?;

        let mut fund_db: IndexFundDB = new_fund.into();
        if fund_db.id.is_empty() {
            fund_db.id = uuid::Uuid::new_v4().to_string();
        }

        diesel::insert_into(index_funds::table)
            .values(&fund_db)
            .execute(conn)?;

        Ok(fund_db.into())
    }

    /// Applies a partial update within a given database transaction
    fn update_in_transaction(
        &self,
        fund_id: &str,
        update: IndexFundUpdate,
        conn: &mut SqliteConnection,
    ) -> Result<IndexFund> {
        update.validate()?;

        let changeset: IndexFundUpdateDB = update.into();

        diesel::update(index_funds.find(fund_id))
            .set(&changeset)
            .execute(conn)?;

        let fund = index_funds
            .select(IndexFundDB::as_select())
            .find(fund_id)
            .first::<IndexFundDB>(conn)?;

        Ok(fund.into())
    }

    /// Deletes a fund by its ID and returns the number of deleted records
    fn delete_in_transaction(&self, fund_id: &str, conn: &mut SqliteConnection) -> Result<usize> {
        let deleted_count = diesel::delete(index_funds.find(fund_id)).execute(conn)?;
        Ok(deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, DbPool, DbTransactionExecutor};
    use fundbook_core::errors::{DatabaseError, Error};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn create_test_repository() -> (FundRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        let repo = FundRepository::new(Arc::clone(&pool));
        (repo, pool, temp_dir)
    }

    fn new_fund(symbol_value: &str) -> NewIndexFund {
        NewIndexFund {
            id: None,
            name: format!("{} Test Fund", symbol_value),
            symbol: symbol_value.to_string(),
            expense_ratio: dec!(0.0010),
            aum: dec!(1000000.00),
            current_price: Some(dec!(50.00)),
            description: None,
        }
    }

    #[test]
    fn test_seeded_catalog_is_present() {
        let (repo, _pool, _tmp) = create_test_repository();

        let response = repo.search(None, 1, 50).expect("search");
        assert_eq!(response.meta.total, 9);
        assert_eq!(response.data.len(), 9);

        let voo = repo.find_by_symbol("VOO").expect("query").expect("VOO seeded");
        assert_eq!(voo.name, "Vanguard S&P 500 ETF");
        assert_eq!(voo.current_price, dec!(415.20));
    }

    #[test]
    fn test_find_by_symbol_matches_case_insensitively() {
        let (repo, _pool, _tmp) = create_test_repository();

        let fund = repo
            .find_by_symbol("vtiax")
            .expect("query")
            .expect("lowercase lookup should match");

        // Canonical casing comes back regardless of the input casing.
        assert_eq!(fund.symbol, "VTIAX");
        assert_eq!(fund.current_price, dec!(150.00));
    }

    #[test]
    fn test_find_by_symbol_unknown_returns_none() {
        let (repo, _pool, _tmp) = create_test_repository();

        let fund = repo.find_by_symbol("NOPE").expect("query");
        assert!(fund.is_none());
    }

    #[test]
    fn test_search_filters_by_symbol_substring() {
        let (repo, _pool, _tmp) = create_test_repository();

        let vti_funds = repo.search(Some("VTI".to_string()), 1, 50).expect("search");
        assert_eq!(vti_funds.meta.total, 2);
        let symbols: Vec<&str> = vti_funds.data.iter().map(|f| f.symbol.as_str()).collect();
        assert!(symbols.contains(&"VTI"));
        assert!(symbols.contains(&"VTIAX"));

        // LIKE matching is case-insensitive.
        let lowercase = repo.search(Some("vxus".to_string()), 1, 50).expect("search");
        assert_eq!(lowercase.meta.total, 1);
        assert_eq!(lowercase.data[0].symbol, "VXUS");
    }

    #[test]
    fn test_search_paginates_and_reports_totals() {
        let (repo, _pool, _tmp) = create_test_repository();

        let first = repo.search(None, 1, 4).expect("search");
        assert_eq!(first.data.len(), 4);
        assert_eq!(first.meta.total, 9);
        assert_eq!(first.meta.page, 1);
        assert_eq!(first.meta.page_size, 4);

        let last = repo.search(None, 3, 4).expect("search");
        assert_eq!(last.data.len(), 1);

        // Listing is ordered by fund name.
        let names: Vec<String> = first.data.iter().map(|f| f.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_create_fund_rejects_duplicate_symbol_case_insensitively() {
        let (repo, pool, _tmp) = create_test_repository();

        let err = pool
            .execute(|conn| repo.create_in_transaction(new_fund("voo"), conn))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[test]
    fn test_create_fund_defaults_price_when_missing() {
        let (repo, pool, _tmp) = create_test_repository();

        let mut fund = new_fund("QQQM");
        fund.current_price = None;

        let created = pool
            .execute(|conn| repo.create_in_transaction(fund, conn))
            .expect("create");

        assert_eq!(created.current_price, dec!(100.00));
    }

    #[test]
    fn test_update_price_leaves_other_fields_untouched() {
        let (repo, pool, _tmp) = create_test_repository();

        let voo = repo.find_by_symbol("VOO").expect("query").expect("seeded");

        let update = IndexFundUpdate {
            current_price: Some(dec!(430.00)),
            ..Default::default()
        };
        let updated = pool
            .execute(|conn| repo.update_in_transaction(&voo.id, update, conn))
            .expect("update");

        assert_eq!(updated.current_price, dec!(430.00));
        assert_eq!(updated.name, voo.name);
        assert_eq!(updated.symbol, "VOO");
        assert_eq!(updated.expense_ratio, voo.expense_ratio);
    }

    #[test]
    fn test_update_unknown_fund_returns_not_found() {
        let (repo, pool, _tmp) = create_test_repository();

        let update = IndexFundUpdate {
            current_price: Some(dec!(10.00)),
            ..Default::default()
        };
        let err = pool
            .execute(|conn| repo.update_in_transaction("missing", update, conn))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_reports_deleted_row_count() {
        let (repo, pool, _tmp) = create_test_repository();

        let created = pool
            .execute(|conn| repo.create_in_transaction(new_fund("SCHB"), conn))
            .expect("create");

        let deleted = pool
            .execute(|conn| repo.delete_in_transaction(&created.id, conn))
            .expect("delete");
        assert_eq!(deleted, 1);

        let again = pool
            .execute(|conn| repo.delete_in_transaction(&created.id, conn))
            .expect("delete");
        assert_eq!(again, 0);
    }
}
