//! Structured error payload.
//!
//! Every business failure surfaces to the caller as this payload with a
//! stable status code. The correlation identifier travels in the response
//! header rather than the body; the body shape is fixed to the four fields
//! below.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, ErrorKind};
use crate::middleware::correlation::{CorrelationId, CORRELATION_ID_HEADER};

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested customer or account does not exist.
    NotFound,
    /// The operation conflicts with existing state.
    Conflict,
    /// A required collaborator is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// Error response payload.
///
/// # Examples
/// ```
/// use backend::models::{Error, ErrorCode};
///
/// let err = Error::not_found("/api/fetch", "customer not found");
/// assert_eq!(err.error_code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// API path where the error occurred.
    #[schema(example = "/api/fetch")]
    pub api_path: String,
    /// Stable machine-readable error code.
    #[schema(example = "NOT_FOUND")]
    pub error_code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "customer not found for mobile number 9876543210")]
    pub error_message: String,
    /// Timestamp when the error occurred.
    pub error_time: DateTime<Utc>,
    #[serde(skip)]
    correlation_id: Option<String>,
}

impl Error {
    /// Create a new error payload.
    ///
    /// Captures the current correlation identifier if one is in scope so
    /// the response header is populated automatically.
    pub fn new(
        error_code: ErrorCode,
        api_path: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            api_path: api_path.into(),
            error_code,
            error_message: error_message.into(),
            error_time: Utc::now(),
            correlation_id: CorrelationId::current().map(|id| id.to_string()),
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(api_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, api_path, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(api_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, api_path, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(api_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, api_path, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(api_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, api_path, message)
    }

    /// Map a domain failure onto the error payload for the given path.
    pub fn from_domain(error: DomainError, api_path: impl Into<String>) -> Self {
        let code = match error.kind() {
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::Conflict => ErrorCode::Conflict,
            ErrorKind::Unavailable => ErrorCode::ServiceUnavailable,
            _ => ErrorCode::InternalError,
        };
        Self::new(code, api_path, error.message())
    }

    /// Correlation identifier captured at construction, if any.
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to API error");
        Error::internal("", "Internal server error")
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error_message)
    }
}

impl std::error::Error for Error {}

impl ErrorCode {
    fn as_status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.error_code.as_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.correlation_id {
            builder.insert_header((CORRELATION_ID_HEADER, id.clone()));
        }
        if matches!(self.error_code, ErrorCode::InternalError) {
            let mut redacted = self.clone();
            redacted.error_message = "Internal server error".to_owned();
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("/api/fetch", "bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("/api/fetch", "missing"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("/api/create", "duplicate"), StatusCode::CONFLICT)]
    #[case(Error::internal("/api/fetch", "boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
        assert_eq!(err.status_code(), status);
    }

    #[rstest]
    #[case(DomainError::not_found("missing"), ErrorCode::NotFound)]
    #[case(DomainError::conflict("duplicate"), ErrorCode::Conflict)]
    #[case(DomainError::unavailable("down"), ErrorCode::ServiceUnavailable)]
    #[case(DomainError::internal("boom"), ErrorCode::InternalError)]
    fn domain_errors_map_to_codes(#[case] domain: DomainError, #[case] expected: ErrorCode) {
        let err = Error::from_domain(domain, "/api/fetch");
        assert_eq!(err.error_code, expected);
        assert_eq!(err.api_path, "/api/fetch");
    }

    #[tokio::test]
    async fn body_carries_the_four_contract_fields() {
        let response = Error::not_found("/api/fetch", "customer not found").error_response();
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON");
        let object = json.as_object().expect("JSON object");

        assert_eq!(object.len(), 4);
        assert_eq!(json["apiPath"], "/api/fetch");
        assert_eq!(json["errorCode"], "NOT_FOUND");
        assert_eq!(json["errorMessage"], "customer not found");
        assert!(object.contains_key("errorTime"));
    }

    #[tokio::test]
    async fn internal_errors_are_redacted() {
        let response = Error::internal("/api/fetch", "connection string leaked").error_response();
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON");

        assert_eq!(json["errorMessage"], "Internal server error");
    }

    #[tokio::test]
    async fn new_captures_correlation_id_in_scope() {
        let id = CorrelationId::new("test-correlation-123");
        let err = CorrelationId::scope(id, async move {
            Error::not_found("/api/fetch", "missing")
        })
        .await;
        assert_eq!(err.correlation_id(), Some("test-correlation-123"));

        let response = err.error_response();
        let header = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("correlation id header")
            .to_str()
            .expect("header is ascii");
        assert_eq!(header, "test-correlation-123");
    }
}
