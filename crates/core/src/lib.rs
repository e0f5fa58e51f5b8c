//! Fundbook Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Fundbook: the user cash
//! ledger, the index-fund catalog, and the portfolio transaction engine.
//! Persistence is defined through repository traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod db;
pub mod errors;
pub mod funds;
pub mod portfolio;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
