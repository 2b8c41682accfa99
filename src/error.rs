use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::vision::DescribeError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Description failed: {0}")]
    DescriptionFailed(#[from] DescribeError),

    #[error("Upload error: {0}")]
    Upload(#[from] axum::extract::multipart::MultipartError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Provider detail stays in the logs; the caller gets a generic
        // message for description failures.
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::DescriptionFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DESCRIPTION_FAILED",
                "Failed to get a description for the uploaded image".to_string(),
            ),
            AppError::Upload(e) => (StatusCode::BAD_REQUEST, "BAD_UPLOAD", e.to_string()),
        };

        tracing::error!("Request failed: {} - {}", code, self);

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}
