use std::sync::Arc;

use super::CurrentUser;
use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fundbook_core::portfolio::{
    OpenPositionRequest, PortfolioSummary, PositionView, SaleProceeds, TradeRequest,
};

async fn get_portfolio(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioSummary>> {
    let summary = state.portfolio_service.get_summary(&user_id)?;
    Ok(Json(summary))
}

async fn open_position(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<OpenPositionRequest>,
) -> ApiResult<(StatusCode, Json<PositionView>)> {
    let view = state
        .portfolio_service
        .open_position(&user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_position(
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PositionView>> {
    let view = state.portfolio_service.get_position(&user_id, &id)?;
    Ok(Json(view))
}

async fn trade_position(
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<TradeRequest>,
) -> ApiResult<Json<PositionView>> {
    let view = state
        .portfolio_service
        .trade_position(&user_id, &id, request)
        .await?;
    Ok(Json(view))
}

async fn close_position(
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SaleProceeds>> {
    let proceeds = state.portfolio_service.close_position(&user_id, &id).await?;
    Ok(Json(proceeds))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(get_portfolio))
        .route("/positions", post(open_position))
        .route(
            "/positions/{id}",
            get(get_position).put(trade_position).delete(close_position),
        )
}
