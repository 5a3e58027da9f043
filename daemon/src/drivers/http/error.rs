use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use paperdash_protocol::api::{ApiResponse, Empty};
use thiserror::Error;

use crate::management::SupervisorError;

pub type ApiResult<T = Empty> = Result<Json<ApiResponse<T>>, ApiError>;

/// Every failure ends up as `{ "success": false, "message": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
    #[error("Failed to read config")]
    ConfigRead(#[source] anyhow::Error),
    #[error("{0}")]
    Failure(String),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ConfigRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ConfigRead(err) => error!("could not read config: {:#}", err),
            ApiError::Internal(err) => warn!("request failed: {:#}", err),
            _ => {}
        }
        (self.status_code(), Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}
