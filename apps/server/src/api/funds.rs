use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use fundbook_core::funds::{FundSearchResponse, IndexFund, IndexFundUpdate, NewIndexFund};

#[derive(Deserialize)]
pub(crate) struct FundListQuery {
    symbol: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

#[utoipa::path(get, path = "/api/v1/funds", responses((status = 200, description = "Paged fund catalog, ordered by name")))]
pub(crate) async fn list_funds(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FundListQuery>,
) -> ApiResult<Json<FundSearchResponse>> {
    let funds = state
        .fund_service
        .search_funds(query.symbol, query.page, query.page_size)?;
    Ok(Json(funds))
}

#[utoipa::path(post, path = "/api/v1/funds", responses((status = 201, description = "Fund created"), (status = 409, description = "Symbol already listed"), (status = 422, description = "Validation failed")))]
pub(crate) async fn create_fund(
    State(state): State<Arc<AppState>>,
    Json(fund): Json<NewIndexFund>,
) -> ApiResult<(StatusCode, Json<IndexFund>)> {
    let created = state.fund_service.create_fund(fund).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/v1/funds/{id}", responses((status = 200, description = "Fund detail"), (status = 404, description = "Unknown fund")))]
pub(crate) async fn get_fund(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<IndexFund>> {
    let fund = state.fund_service.get_fund(&id)?;
    Ok(Json(fund))
}

#[utoipa::path(put, path = "/api/v1/funds/{id}", responses((status = 200, description = "Fund after the update"), (status = 404, description = "Unknown fund")))]
pub(crate) async fn update_fund(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<IndexFundUpdate>,
) -> ApiResult<Json<IndexFund>> {
    let updated = state.fund_service.update_fund(&id, update).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/v1/funds/{id}", responses((status = 204, description = "Fund removed"), (status = 404, description = "Unknown fund")))]
pub(crate) async fn delete_fund(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.fund_service.delete_fund(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/funds", get(list_funds).post(create_fund))
        .route(
            "/funds/{id}",
            get(get_fund).put(update_fund).delete(delete_fund),
        )
}
