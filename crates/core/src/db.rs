//! Database abstractions shared by the domain layer.
//!
//! The domain services are generic over a [`DbTransactionExecutor`] so that
//! multi-step mutations (debit cash, upsert a holding) commit or roll back as
//! a unit. The storage crate provides pool construction and migrations; this
//! module only defines the types the services need to stay storage-agnostic.

use std::sync::Arc;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

use crate::errors::{Error, Result};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = SqliteConnection;

/// Trait for executing database transactions
pub trait DbTransactionExecutor {
    /// Execute operations within a transaction and return the result
    fn execute<F, T, E>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DbConnection) -> std::result::Result<T, E>,
        E: Into<Error>;
}

/// Implementation of DbTransactionExecutor for DbPool
impl DbTransactionExecutor for DbPool {
    fn execute<F, T, E>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DbConnection) -> std::result::Result<T, E>,
        E: Into<Error>,
    {
        let mut conn = self.get()?;

        // BEGIN IMMEDIATE takes the write lock up front, so concurrent
        // mutations queue on busy_timeout instead of failing mid-transaction.
        // An Err from the closure rolls the transaction back and is returned
        // to the caller unchanged.
        conn.immediate_transaction::<_, Error, _>(|tx_conn| f(tx_conn).map_err(Into::into))
    }
}

/// Implementation of DbTransactionExecutor for Arc<DbPool>
impl DbTransactionExecutor for Arc<DbPool> {
    fn execute<F, T, E>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DbConnection) -> std::result::Result<T, E>,
        E: Into<Error>,
    {
        (**self).execute(f)
    }
}
