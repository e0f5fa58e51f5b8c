use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::State,
    routing::get,
    Router,
};
use fundbook_storage_sqlite::db::get_connection;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub(crate) async fn healthz() -> &'static str {
    "ok"
}

/// Readiness requires a connection from the pool, so a wedged or missing
/// database reports as not ready instead of failing on the first query.
#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready"), (status = 500, description = "Database unavailable")))]
pub(crate) async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    get_connection(&state.pool).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok("ok")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
