//! SQLite storage implementation for the index fund catalog.

mod model;
mod repository;

pub use model::{IndexFundDB, IndexFundUpdateDB};
pub use repository::FundRepository;
