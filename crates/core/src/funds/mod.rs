//! Index funds module - domain models, services, and traits.

mod funds_model;
mod funds_service;
mod funds_traits;

mod funds_model_tests;

pub use funds_model::{
    default_share_price, FundSearchResponse, FundSearchResponseMeta, IndexFund, IndexFundUpdate,
    NewIndexFund,
};
pub use funds_service::FundService;
pub use funds_traits::{FundRepositoryTrait, FundServiceTrait};
