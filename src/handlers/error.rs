use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::ServiceError;

const INTERNAL_MESSAGE: &str = "An internal error occurred.";

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// HTTP error rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessageBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message)
            | ServiceError::Conflict(message)
            | ServiceError::InvalidCredentials(message) => {
                ApiError::new(StatusCode::BAD_REQUEST, message)
            }
            ServiceError::NotFound(message) => ApiError::new(StatusCode::NOT_FOUND, message),
            ServiceError::Unauthorized(message) => ApiError::new(StatusCode::UNAUTHORIZED, message),
            ServiceError::Internal(message) => {
                log::error!("Internal error: {}", message);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
            }
            ServiceError::Storage(e) => {
                log::error!("Storage error: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "Request body must be a JSON object.",
        )
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn maps_service_errors_to_status_codes() {
        let cases = [
            (ServiceError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("c".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::InvalidCredentials("i".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (
                ServiceError::Unauthorized("u".into()),
                StatusCode::UNAUTHORIZED,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn storage_errors_hide_details() {
        let err = ApiError::from(ServiceError::Storage(StoreError::Database(
            sqlx::Error::PoolTimedOut,
        )));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, INTERNAL_MESSAGE);
    }
}
