//! HTTP error handling and automated response generation
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::errors::DatabaseError;

/// Represents an HTTP status code, optionally with a custom message.
#[derive(Debug)]
pub struct HttpError {
    /// The numeric HTTP status code to respond with.
    status: StatusCode,
    /// The message to include in the response.
    message: Option<String>,
}

impl From<StatusCode> for HttpError {
    fn from(err: StatusCode) -> Self {
        Self {
            status: err,
            message: None,
        }
    }
}

impl HttpError {
    /// Construct a new HTTP error with a given status code and message.
    pub const fn new(status: StatusCode, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Shorthand for a 400 response with a message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, Some(message.into()))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let message = self
            .message
            .unwrap_or_else(|| self.status.canonical_reason().unwrap_or("").to_owned());
        (self.status, Json(json!({"message": message}))).into_response()
    }
}

impl From<DatabaseError> for HttpError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("Error raised from database in handler: {err}");
        // The driver's message can leak schema details, so it is not echoed.
        Self::from(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), Some(rejection.body_text()))
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), Some(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn falls_back_to_canonical_reason() {
        let response = HttpError::from(StatusCode::NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"message": "Not Found"}));
    }

    #[tokio::test]
    async fn uses_custom_message() {
        let response = HttpError::bad_request("Location must not be blank").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Location must not be blank");
    }
}
