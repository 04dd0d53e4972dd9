/*
 * Responsibility
 * - App-wide AppError (every gate/guard rejection is one of these)
 * - IntoResponse (HTTP status / JSON error body), the only place outcomes become responses
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No token was provided")]
    MissingCredential,
    // Malformed, expired, wrong algorithm and bad signature all land here.
    #[error("Token not valid - Unauthorized!")]
    InvalidCredential,
    #[error("{message}")]
    InsufficientRole {
        status: StatusCode,
        message: &'static str,
    },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::FORBIDDEN,
            AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::InsufficientRole { status, .. } => *status,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::MissingCredential => "MISSING_CREDENTIAL",
            AppError::InvalidCredential => "INVALID_CREDENTIAL",
            AppError::InsufficientRole { .. } => "INSUFFICIENT_ROLE",
            AppError::Internal => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_statuses_follow_the_contract() {
        assert_eq!(AppError::MissingCredential.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InvalidCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InsufficientRole {
                status: StatusCode::FORBIDDEN,
                message: "nope",
            }
            .status(),
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn response_body_carries_code_and_message_only() {
        let response = AppError::InvalidCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"]["code"], "INVALID_CREDENTIAL");
        assert_eq!(json["error"]["message"], "Token not valid - Unauthorized!");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }
}
