use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use fundbook_core::{
    funds::{FundService, FundServiceTrait},
    portfolio::{PortfolioService, PortfolioServiceTrait},
    users::{UserService, UserServiceTrait},
};
use fundbook_storage_sqlite::{
    db::{self, DbPool},
    funds::FundRepository,
    holdings::PositionRepository,
    users::UserRepository,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub fund_service: Arc<dyn FundServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    /// Kept for readiness checks; services hold their own handle.
    pub pool: Arc<DbPool>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("FUNDBOOK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.data_dir)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let user_repository = Arc::new(UserRepository::new(pool.clone()));
    let fund_repository = Arc::new(FundRepository::new(pool.clone()));
    let position_repository = Arc::new(PositionRepository::new(pool.clone()));

    let user_service = Arc::new(UserService::new(user_repository.clone(), pool.clone()));
    let fund_service = Arc::new(FundService::new(fund_repository.clone(), pool.clone()));
    let portfolio_service = Arc::new(PortfolioService::new(
        position_repository,
        user_repository,
        fund_repository,
        pool.clone(),
    ));

    Ok(Arc::new(AppState {
        user_service,
        fund_service,
        portfolio_service,
        pool,
        db_path,
    }))
}
