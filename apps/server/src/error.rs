use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use fundbook_core::errors::{DatabaseError, Error as CoreError};
use fundbook_core::portfolio::PortfolioError;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    // Surface the underlying error message to help debugging during development
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

/// Maps a domain error onto the HTTP status and the message clients see.
/// Wrapper variants are unwrapped so the body carries the domain message
/// rather than the "Portfolio error: ..." prefix of the outer enum.
fn core_error_response(err: &CoreError) -> (StatusCode, String) {
    match err {
        CoreError::Portfolio(e) => {
            let status = match e {
                PortfolioError::FundNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
                PortfolioError::FundMissingForPosition | PortfolioError::PositionNotFound => {
                    StatusCode::NOT_FOUND
                }
                PortfolioError::PositionExists
                | PortfolioError::InsufficientFunds
                | PortfolioError::InsufficientShares => StatusCode::BAD_REQUEST,
            };
            (status, e.to_string())
        }
        CoreError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        CoreError::Database(DatabaseError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
        CoreError::Database(DatabaseError::UniqueViolation(msg)) => {
            (StatusCode::CONFLICT, msg.clone())
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => core_error_response(e),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
