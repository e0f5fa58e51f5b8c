//! SQLite storage implementation for Fundbook.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `fundbook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! All other crates are database-agnostic and work with traits.
//!
//! ```text
//! core (domain)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!   SQLite DB
//! ```

pub mod db;
pub mod schema;

mod utils;

// Repository implementations
pub mod funds;
pub mod holdings;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool,
    DbTransactionExecutor, PooledDbConnection,
};

// Re-export from fundbook-core for convenience
pub use fundbook_core::errors::{DatabaseError, Error, Result};
