use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::get_connection;
use crate::schema::holdings;
use crate::schema::holdings::dsl::*;

use fundbook_core::errors::Result;
use fundbook_core::portfolio::{NewPosition, Position, PositionRepositoryTrait};

use super::model::HoldingDB;

/// Repository for managing holding rows in the database
pub struct PositionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl PositionRepository {
    /// Creates a new PositionRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl PositionRepositoryTrait for PositionRepository {
    /// Retrieves a holding by its ID
    fn find_by_id(&self, position_id: &str) -> Result<Option<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let holding = holdings
            .select(HoldingDB::as_select())
            .find(position_id)
            .first::<HoldingDB>(&mut conn)
            .optional()?;

        Ok(holding.map(Position::from))
    }

    /// Lists a user's holdings ordered by ticker symbol
    fn list_for_user(&self, user_id_param: &str) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let results = holdings
            .filter(user_id.eq(user_id_param))
            .select(HoldingDB::as_select())
            .order(symbol.asc())
            .load::<HoldingDB>(&mut conn)?;

        Ok(results.into_iter().map(Position::from).collect())
    }

    fn find_for_user_in_transaction(
        &self,
        position_id: &str,
        user_id_param: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Option<Position>> {
        let holding = holdings
            .filter(id.eq(position_id))
            .filter(user_id.eq(user_id_param))
            .select(HoldingDB::as_select())
            .first::<HoldingDB>(conn)
            .optional()?;

        Ok(holding.map(Position::from))
    }

    /// Looks up a user's holding by ticker symbol.
    ///
    /// The symbol column uses NOCASE collation, so the match is
    /// case-insensitive.
    fn find_by_user_and_symbol_in_transaction(
        &self,
        user_id_param: &str,
        symbol_param: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Option<Position>> {
        let holding = holdings
            .filter(user_id.eq(user_id_param))
            .filter(symbol.eq(symbol_param))
            .select(HoldingDB::as_select())
            .first::<HoldingDB>(conn)
            .optional()?;

        Ok(holding.map(Position::from))
    }

    /// Creates a new holding within a given database transaction
    fn create_in_transaction(
        &self,
        new_position: NewPosition,
        conn: &mut SqliteConnection,
    ) -> Result<Position> {
        let mut holding_db: HoldingDB = new_position.into();
        if holding_db.id.is_empty() {
            holding_db.id = uuid::Uuid::new_v4().to_string();
        }

        diesel::insert_into(holdings::table)
            .values(&holding_db)
            .execute(conn)?;

        Ok(holding_db.into())
    }

    /// Overwrites a holding's share count and average purchase price within
    /// a given database transaction
    fn update_in_transaction(
        &self,
        position_id: &str,
        new_shares: Decimal,
        new_purchase_price: Decimal,
        conn: &mut SqliteConnection,
    ) -> Result<Position> {
        diesel::update(holdings.find(position_id))
            .set((
                shares.eq(new_shares.to_string()),
                purchase_price.eq(new_purchase_price.to_string()),
                updated_at.eq(chrono::Utc::now().to_rfc3339()),
            ))
            .execute(conn)?;

        let holding = holdings
            .select(HoldingDB::as_select())
            .find(position_id)
            .first::<HoldingDB>(conn)?;

        Ok(holding.into())
    }

    /// Deletes a holding by its ID and returns the number of deleted records
    fn delete_in_transaction(&self, position_id: &str, conn: &mut SqliteConnection) -> Result<usize> {
        let deleted_count = diesel::delete(holdings.find(position_id)).execute(conn)?;
        Ok(deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, DbPool, DbTransactionExecutor};
    use crate::users::UserRepository;
    use fundbook_core::errors::{DatabaseError, Error};
    use fundbook_core::portfolio::PortfolioError;
    use fundbook_core::users::UserRepositoryTrait;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn create_test_repository() -> (PositionRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        let repo = PositionRepository::new(Arc::clone(&pool));
        (repo, pool, temp_dir)
    }

    fn holding(user: &str, symbol_value: &str) -> NewPosition {
        NewPosition {
            id: None,
            user_id: user.to_string(),
            symbol: symbol_value.to_string(),
            shares: dec!(10.00),
            purchase_price: dec!(150.00),
        }
    }

    #[test]
    fn test_create_and_find_roundtrip() {
        let (repo, pool, _tmp) = create_test_repository();

        let created = pool
            .execute(|conn| repo.create_in_transaction(holding("demo-user", "VOO"), conn))
            .expect("create");
        assert!(!created.id.is_empty());

        let fetched = repo
            .find_by_id(&created.id)
            .expect("query")
            .expect("row should exist");
        assert_eq!(fetched.user_id, "demo-user");
        assert_eq!(fetched.symbol, "VOO");
        assert_eq!(fetched.shares, dec!(10.00));
        assert_eq!(fetched.purchase_price, dec!(150.00));
    }

    #[test]
    fn test_find_by_user_and_symbol_matches_case_insensitively() {
        let (repo, pool, _tmp) = create_test_repository();

        pool.execute(|conn| repo.create_in_transaction(holding("demo-user", "VTIAX"), conn))
            .expect("create");

        let found = pool
            .execute(|conn| {
                repo.find_by_user_and_symbol_in_transaction("demo-user", "vtiax", conn)
            })
            .expect("query")
            .expect("lowercase lookup should match");

        assert_eq!(found.symbol, "VTIAX");
    }

    #[test]
    fn test_duplicate_user_symbol_rejected_case_insensitively() {
        let (repo, pool, _tmp) = create_test_repository();

        pool.execute(|conn| repo.create_in_transaction(holding("demo-user", "VOO"), conn))
            .expect("create");

        let err = pool
            .execute(|conn| repo.create_in_transaction(holding("demo-user", "voo"), conn))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[test]
    fn test_list_for_user_orders_by_symbol() {
        let (repo, pool, _tmp) = create_test_repository();

        for ticker in ["VTI", "AGG", "VOO"] {
            pool.execute(|conn| repo.create_in_transaction(holding("demo-user", ticker), conn))
                .expect("create");
        }

        let listed = repo.list_for_user("demo-user").expect("list");
        let symbols: Vec<&str> = listed.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AGG", "VOO", "VTI"]);
    }

    #[test]
    fn test_update_overwrites_shares_and_price() {
        let (repo, pool, _tmp) = create_test_repository();

        let created = pool
            .execute(|conn| repo.create_in_transaction(holding("demo-user", "VOO"), conn))
            .expect("create");

        let updated = pool
            .execute(|conn| {
                repo.update_in_transaction(&created.id, dec!(15.00), dec!(160.00), conn)
            })
            .expect("update");

        assert_eq!(updated.shares, dec!(15.00));
        assert_eq!(updated.purchase_price, dec!(160.00));
    }

    #[test]
    fn test_delete_reports_deleted_row_count() {
        let (repo, pool, _tmp) = create_test_repository();

        let created = pool
            .execute(|conn| repo.create_in_transaction(holding("demo-user", "VOO"), conn))
            .expect("create");

        let deleted = pool
            .execute(|conn| repo.delete_in_transaction(&created.id, conn))
            .expect("delete");
        assert_eq!(deleted, 1);

        assert!(repo.find_by_id(&created.id).expect("query").is_none());
    }

    #[test]
    fn test_foreign_key_rejects_unknown_user() {
        let (repo, pool, _tmp) = create_test_repository();

        let err = pool
            .execute(|conn| repo.create_in_transaction(holding("ghost", "VOO"), conn))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
    }

    #[test]
    fn test_execute_rolls_back_all_writes_on_error() {
        let (repo, pool, _tmp) = create_test_repository();
        let users_repo = UserRepository::new(Arc::clone(&pool));

        let result: Result<()> = pool.execute(|conn| {
            users_repo.set_balance_in_transaction("demo-user", dec!(1.00), conn)?;
            repo.create_in_transaction(holding("demo-user", "VOO"), conn)?;
            Err(Error::Portfolio(PortfolioError::InsufficientFunds))
        });

        assert!(matches!(
            result.unwrap_err(),
            Error::Portfolio(PortfolioError::InsufficientFunds)
        ));

        // Neither write survived the rollback.
        let user = users_repo.get_by_id("demo-user").expect("reload");
        assert_eq!(user.balance, dec!(10000.00));
        assert!(repo.list_for_user("demo-user").expect("list").is_empty());
    }
}
