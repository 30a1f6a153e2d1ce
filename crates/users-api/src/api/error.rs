use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::user_actor::UserError;

/// `{"message": "..."}` body used for errors and for the reset acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failures rendered by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("User not found")]
    NotFound,
    /// The request body could not be read as JSON.
    #[error("{message}")]
    BadBody { status: StatusCode, message: String },
    #[error("Internal server error")]
    Internal(String),
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => ApiError::NotFound,
            UserError::ActorCommunicationError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadBody { status, .. } => *status,
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "Store unavailable");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(MessageBody::new(self.to_string()))).into_response()
    }
}
