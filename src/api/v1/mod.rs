//! V1 API handlers.

mod lists;
mod system;
mod tasks;

#[cfg(test)]
mod mod_test;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::error;
use utoipa::ToSchema;

use crate::service::TodoError;

pub use lists::*;
pub use system::*;
pub use tasks::*;

/// Error response DTO
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "List not found")]
    pub error: String,
}

/// Confirmation message DTO
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "List deleted")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// Map a service error onto its HTTP status and the error envelope.
pub(crate) fn error_response(e: TodoError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        TodoError::Validation { .. } => StatusCode::BAD_REQUEST,
        TodoError::NotFound { .. } => StatusCode::NOT_FOUND,
        TodoError::Conflict { .. } => StatusCode::CONFLICT,
        TodoError::Store(source) => {
            error!(error = %source, "Store operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// JSON request body whose rejections use the error envelope.
///
/// Malformed JSON, wrong field types and a missing `Content-Type` all answer
/// 400 with `{"error": ...}` instead of axum's plain-text 415/422.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_response(rejection)),
        }
    }
}

fn rejection_response(rejection: JsonRejection) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
}
