use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fundbook_core::users::{NewUser, User};

async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(&id)?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let created = state.user_service.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
}
