//! User service.

use log::debug;
use std::sync::Arc;

use super::users_model::{default_starting_balance, NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::db::DbTransactionExecutor;
use crate::errors::Result;

/// Service for managing users (Generic over Executor)
pub struct UserService<E: DbTransactionExecutor + Send + Sync + Clone> {
    repository: Arc<dyn UserRepositoryTrait>,
    transaction_executor: E,
}

impl<E: DbTransactionExecutor + Send + Sync + Clone> UserService<E> {
    /// Creates a new UserService instance
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, transaction_executor: E) -> Self {
        Self {
            repository,
            transaction_executor,
        }
    }
}

#[async_trait::async_trait]
impl<E: DbTransactionExecutor + Send + Sync + Clone> UserServiceTrait for UserService<E> {
    /// Retrieves a user by ID
    fn get_user(&self, user_id: &str) -> Result<User> {
        (*self.repository).get_by_id(user_id)
    }

    /// Creates a new user, applying the default starting balance when none is
    /// given
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        debug!("Creating user {}", new_user.email);

        let mut new_user = new_user;
        if new_user.balance.is_none() {
            new_user.balance = Some(default_starting_balance());
        }

        // Clones for the transaction closure
        let repository_for_tx = self.repository.clone();
        let executor_for_tx = self.transaction_executor.clone();

        executor_for_tx
            .execute(move |tx_conn| repository_for_tx.create_in_transaction(new_user, tx_conn))
    }
}
