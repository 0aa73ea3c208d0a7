use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Error envelope returned by all endpoints on failure. Mirrors the success
/// envelope: `success` is always `false` here.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    #[schema(example = false)]
    pub success: bool,
    /// Human-readable error description.
    #[schema(example = "Please enter the searchterm")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// Missing, malformed, or expired credentials. One message for every
    /// failure mode so the response does not reveal which check tripped.
    Unauthenticated,
    AdminOnly,
    OwnerOnly,
    NotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "You need to be logged in to visit this route".into(),
            ),
            AppError::AdminOnly => (
                StatusCode::FORBIDDEN,
                "Authorization denied, only admins can visit this route".into(),
            ),
            AppError::OwnerOnly => (
                StatusCode::FORBIDDEN,
                "Authorization denied, only the owner can visit this route".into(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = ErrorBody {
            success: false,
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
