use crate::error::BankError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Wraps `BankError` so handlers can return it directly.
#[derive(Debug)]
pub struct ApiError(pub BankError);

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl From<BankError> for ApiError {
    fn from(err: BankError) -> Self {
        ApiError(err)
    }
}

pub fn status_for(err: &BankError) -> StatusCode {
    match err {
        BankError::NotFound { .. } => StatusCode::NOT_FOUND,
        BankError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        BankError::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
        BankError::Conflict(_) => StatusCode::CONFLICT,
        BankError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        BankError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
