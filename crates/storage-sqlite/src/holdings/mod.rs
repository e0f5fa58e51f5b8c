//! SQLite storage implementation for portfolio holdings.

mod model;
mod repository;

pub use model::HoldingDB;
pub use repository::PositionRepository;
