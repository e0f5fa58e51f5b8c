//! Portfolio module - positions, trading operations, and valuation.

mod portfolio_errors;
mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;
pub mod valuation;


pub use portfolio_errors::PortfolioError;
pub use portfolio_model::{
    min_share_quantity, FundSnapshot, NewPosition, OpenPositionRequest, PortfolioSummary,
    Position, PositionView, SaleProceeds, TradeAction, TradeRequest,
};
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::{PortfolioServiceTrait, PositionRepositoryTrait};
