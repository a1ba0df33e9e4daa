use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error surface shared by every cell. Domain errors (PatientError,
/// StockError, ...) convert into one of these at the handler boundary;
/// the variant picks the HTTP status and the message becomes the body.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing, malformed, or expired credentials.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A row lookup came back empty: patient, study, schedule, item.
    #[error("Not Found: {0}")]
    NotFound(String),

    /// The request is well-formed but cannot be honored, e.g. issuing
    /// more stock than an item holds.
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    /// Store client failures and undeserializable rows.
    #[error("Database error: {0}")]
    Database(String),

    /// Field-level rejections: bad email format, inverted time range.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Overlapping shift bookings and other uniqueness collisions.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An upstream call (mail relay) failed.
    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Auth(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Internal(msg)
            | AppError::Database(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::ExternalService(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        tracing::error!("Request failed with {}: {}", status, self.message());

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_expected_statuses() {
        let cases = [
            (AppError::Auth("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::ExternalService("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn response_body_carries_the_message() {
        let err = AppError::Conflict("Schedule conflict detected".into());
        assert_eq!(err.message(), "Schedule conflict detected");
    }
}
