//! Users module - domain models, services, and traits.

mod users_model;
mod users_service;
mod users_traits;

mod users_model_tests;

pub use users_model::{default_starting_balance, NewUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
