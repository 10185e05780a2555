//! Error handling middleware - RFC 7807 compliant responses.

use std::fmt;

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use pageturner_core::{DomainError, ErrorCode};
use pageturner_shared::ErrorResponse;

use crate::observability::RequestId;

/// Handler-level error: a [`DomainError`] rendered as problem details.
///
/// The internal `Display` of the wrapped error is logged, never sent. The
/// client sees `client_msg()` or, when that is empty, a generic title for
/// the category.
#[derive(Debug)]
pub struct AppError(pub DomainError);

impl AppError {
    fn body(&self) -> ErrorResponse {
        let err = &self.0;
        let title = match err.client_msg() {
            "" => default_title(err.code()),
            msg => msg,
        };

        let mut body = ErrorResponse::new(err.http_status(), err.name(), title);
        if let Some(detail) = err.detail() {
            body = body.with_context(detail.clone());
        }
        if let Some(request_id) = RequestId::current() {
            body = body.with_request_id(request_id.as_str());
        }
        body
    }
}

/// Client-safe title used when an error carries no message.
fn default_title(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InternalProcess => "Internal Server Error",
        ErrorCode::AuthPermissionDenied => "Forbidden",
        ErrorCode::AuthNotAuthenticated => "Unauthorized",
        ErrorCode::ResourceNotFound => "Not Found",
        ErrorCode::ParameterInvalid => "Bad Request",
        ErrorCode::RemoteProcess => "Bad Gateway",
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                code = %self.0.code(),
                status = status.as_u16(),
                error = %self.0,
                "Request failed"
            );
        } else {
            tracing::warn!(
                code = %self.0.code(),
                status = status.as_u16(),
                error = %self.0,
                "Request rejected"
            );
        }

        HttpResponse::build(status).json(self.body())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError(err)
    }
}

/// Malformed or mistyped JSON body.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError(
        DomainError::new(ErrorCode::ParameterInvalid, err.to_string())
            .with_msg("request body is invalid"),
    )
    .into()
}

/// Path segment that does not parse, e.g. a non-numeric id.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError(
        DomainError::new(ErrorCode::ParameterInvalid, err.to_string())
            .with_msg("path parameter is invalid"),
    )
    .into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use pageturner_core::error::Detail;

    async fn render(err: DomainError) -> (StatusCode, serde_json::Value) {
        let response = AppError(err).error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn client_message_becomes_title() {
        let detail = Detail::from_iter([("id".to_owned(), serde_json::json!(42))]);
        let (status, body) = render(
            DomainError::new(ErrorCode::ResourceNotFound, "no user row with id = 42")
                .with_msg("user not found")
                .with_detail(detail),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["title"], "user not found");
        assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(body["context"]["id"], 42);
    }

    #[actix_web::test]
    async fn internal_cause_is_never_sent() {
        let (status, body) = render(DomainError::new(
            ErrorCode::RemoteProcess,
            "password authentication failed for user admin",
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["title"], "Bad Gateway");
        assert_eq!(body["code"], "REMOTE_PROCESS_ERROR");
        assert!(!body.to_string().contains("password"));
        assert!(body.get("context").is_none());
    }

    #[actix_web::test]
    async fn status_override_is_used() {
        let err = DomainError::new(ErrorCode::ParameterInvalid, "copy 7 is borrowed")
            .with_msg("book copy is not available")
            .with_status(409)
            .unwrap();
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], 409);
        assert_eq!(body["code"], "PARAMETER_INVALID");
    }
}
