use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::get_connection;
use crate::schema::users;
use crate::schema::users::dsl::*;

use fundbook_core::errors::Result;
use fundbook_core::users::{NewUser, User, UserRepositoryTrait};

use super::model::UserDB;

/// Repository for managing user data in the database
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    /// Retrieves a user by ID
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user = users
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(&mut conn)?;

        Ok(user.into())
    }

    fn get_by_id_in_transaction(
        &self,
        user_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<User> {
        let user = users
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(conn)?;

        Ok(user.into())
    }

    /// Overwrites the user's cash balance within a given database transaction
    fn set_balance_in_transaction(
        &self,
        user_id: &str,
        new_balance: Decimal,
        conn: &mut SqliteConnection,
    ) -> Result<User> {
        diesel::update(users.find(user_id))
            .set((
                balance.eq(new_balance.to_string()),
                updated_at.eq(chrono::Utc::now().to_rfc3339()),
            ))
            .execute(conn)?;

        let user = users
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(conn)?;

        Ok(user.into())
    }

    /// Creates a new user within a given database transaction
    fn create_in_transaction(
        &self,
        new_user: NewUser,
        conn: &mut SqliteConnection,
    ) -> Result<User> {
        new_user.validate()?;

        let mut user_db: UserDB = new_user.into();
        if user_db.id.is_empty() {
            user_db.id = uuid::Uuid::new_v4().to_string();
        }

        diesel::insert_into(users::table)
            .values(&user_db)
            .execute(conn)?;

        Ok(user_db.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, DbPool, DbTransactionExecutor};
    use fundbook_core::errors::{DatabaseError, Error};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    /// Creates a migrated test database. The temp dir is returned to keep it alive.
    fn create_test_repository() -> (UserRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        let repo = UserRepository::new(Arc::clone(&pool));
        (repo, pool, temp_dir)
    }

    #[test]
    fn test_get_by_id_returns_seeded_demo_user() {
        let (repo, _pool, _tmp) = create_test_repository();

        let user = repo.get_by_id("demo-user").expect("demo user should exist");

        assert_eq!(user.name, "Test User");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.balance, dec!(10000.00));
    }

    #[test]
    fn test_get_by_id_unknown_returns_not_found() {
        let (repo, _pool, _tmp) = create_test_repository();

        let err = repo.get_by_id("missing").unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::NotFound(_))
        ));
    }

    #[test]
    fn test_create_user_assigns_id_and_default_balance() {
        let (repo, pool, _tmp) = create_test_repository();

        let created = pool
            .execute(|conn| {
                repo.create_in_transaction(
                    NewUser {
                        id: None,
                        name: "Ada".to_string(),
                        email: "ada@example.com".to_string(),
                        balance: None,
                    },
                    conn,
                )
            })
            .expect("create should succeed");

        assert!(!created.id.is_empty());
        assert_eq!(created.balance, dec!(10000.00));

        let fetched = repo.get_by_id(&created.id).expect("round trip");
        assert_eq!(fetched.email, "ada@example.com");
    }

    #[test]
    fn test_create_user_duplicate_email_rejected() {
        let (repo, pool, _tmp) = create_test_repository();

        let err = pool
            .execute(|conn| {
                repo.create_in_transaction(
                    NewUser {
                        id: None,
                        name: "Copycat".to_string(),
                        email: "test@example.com".to_string(),
                        balance: None,
                    },
                    conn,
                )
            })
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[test]
    fn test_set_balance_overwrites_stored_value() {
        let (repo, pool, _tmp) = create_test_repository();

        let updated = pool
            .execute(|conn| repo.set_balance_in_transaction("demo-user", dec!(8500.00), conn))
            .expect("update should succeed");
        assert_eq!(updated.balance, dec!(8500.00));

        let fetched = repo.get_by_id("demo-user").expect("reload");
        assert_eq!(fetched.balance, dec!(8500.00));
    }
}
