//! User repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::users_model::{NewUser, User};
use crate::db::DbConnection;
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
///
/// Implementations handle the persistence of users and their cash balances.
/// The `*_in_transaction` methods run against a caller-supplied connection so
/// balance mutations commit atomically with the position changes that caused
/// them.
pub trait UserRepositoryTrait: Send + Sync {
    /// Retrieves a user by ID.
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Retrieves a user by ID inside an open transaction.
    fn get_by_id_in_transaction(&self, user_id: &str, conn: &mut DbConnection) -> Result<User>;

    /// Overwrites a user's cash balance inside an open transaction.
    fn set_balance_in_transaction(
        &self,
        user_id: &str,
        balance: Decimal,
        conn: &mut DbConnection,
    ) -> Result<User>;

    /// Creates a new user inside an open transaction.
    fn create_in_transaction(&self, new_user: NewUser, conn: &mut DbConnection) -> Result<User>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Retrieves a user by ID.
    fn get_user(&self, user_id: &str) -> Result<User>;

    /// Creates a new user with business validation.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
}
