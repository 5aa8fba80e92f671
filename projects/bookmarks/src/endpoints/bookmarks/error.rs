use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use super::validate::ValidationError;
use crate::service::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation {
        #[from]
        source: ValidationError,
    },
    #[error("MalformedBody: {source}")]
    MalformedBody {
        #[from]
        source: JsonRejection,
    },
    #[error("Bookmark Not Found")]
    NotFound,
    #[error(transparent)]
    Store {
        #[from]
        source: StoreError,
    },
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": { "message": message.into() } }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { source } => error_body(StatusCode::BAD_REQUEST, source.to_string()),
            ApiError::MalformedBody { source } => error_body(StatusCode::BAD_REQUEST, source.body_text()),
            ApiError::NotFound => error_body(StatusCode::NOT_FOUND, "Bookmark Not Found"),
            ApiError::Store { source } => {
                error!(error = %source, "storage call failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "server error")
            }
        }
    }
}
