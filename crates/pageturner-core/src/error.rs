//! Domain-level error types.
//!
//! Every failure that crosses a repository boundary is a [`DomainError`]: a
//! category ([`ErrorCode`]) that fixes the default HTTP status, the native
//! cause (logged, never shown to clients), and optional client-facing
//! decoration.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed native cause carried by a [`DomainError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Structured, business-specific context attached to an error.
pub type Detail = serde_json::Map<String, serde_json::Value>;

/// Result alias used by every repository port.
pub type DomainResult<T> = Result<T, DomainError>;

/// Closed set of error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Local construction or logic failure, e.g. a malformed query.
    InternalProcess,
    /// The caller is known but not allowed to do this.
    AuthPermissionDenied,
    /// The caller could not be identified.
    AuthNotAuthenticated,
    /// A lookup found nothing.
    ResourceNotFound,
    /// Caller input was rejected.
    ParameterInvalid,
    /// The store (or another remote) failed.
    RemoteProcess,
}

impl ErrorCode {
    /// Every category, in declaration order.
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::InternalProcess,
        ErrorCode::AuthPermissionDenied,
        ErrorCode::AuthNotAuthenticated,
        ErrorCode::ResourceNotFound,
        ErrorCode::ParameterInvalid,
        ErrorCode::RemoteProcess,
    ];

    /// Stable machine-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::InternalProcess => "INTERNAL_PROCESS",
            ErrorCode::AuthPermissionDenied => "AUTH_PERMISSION_DENIED",
            ErrorCode::AuthNotAuthenticated => "AUTH_NOT_AUTHENTICATED",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::ParameterInvalid => "PARAMETER_INVALID",
            ErrorCode::RemoteProcess => "REMOTE_PROCESS_ERROR",
        }
    }

    /// Default HTTP status for the category.
    pub const fn http_status(self) -> u16 {
        match self {
            ErrorCode::InternalProcess => 500,
            ErrorCode::AuthPermissionDenied => 403,
            ErrorCode::AuthNotAuthenticated => 401,
            ErrorCode::ResourceNotFound => 404,
            ErrorCode::ParameterInvalid => 400,
            ErrorCode::RemoteProcess => 502,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A categorized failure carrying HTTP-mapping metadata.
///
/// Build one with [`DomainError::new`] (wrapping a native cause) or from a
/// bare [`ErrorCode`], then decorate it:
///
/// ```
/// use pageturner_core::{DomainError, ErrorCode};
///
/// let err = DomainError::new(ErrorCode::ResourceNotFound, "no row for id 7")
///     .with_msg("user not found");
/// assert_eq!(err.http_status(), 404);
/// assert_eq!(err.client_msg(), "user not found");
/// assert_eq!(err.to_string(), "no row for id 7: user not found");
/// ```
#[derive(Debug)]
pub struct DomainError {
    code: ErrorCode,
    cause: Option<BoxError>,
    client_msg: Option<String>,
    remote_status: Option<u16>,
    detail: Option<Detail>,
}

impl DomainError {
    /// Wrap a native cause under `code`.
    ///
    /// If `cause` already is a `DomainError` it is returned unchanged, so
    /// errors can be re-wrapped at every layer without nesting.
    pub fn new(code: ErrorCode, cause: impl Into<BoxError>) -> Self {
        match cause.into().downcast::<DomainError>() {
            Ok(existing) => *existing,
            Err(cause) => Self {
                code,
                cause: Some(cause),
                client_msg: None,
                remote_status: None,
                detail: None,
            },
        }
    }

    /// Set the message that is safe to return to clients.
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.client_msg = Some(msg.into());
        self
    }

    /// Override the HTTP status.
    ///
    /// Fails for values outside `100..=599`; the untouched error can be
    /// recovered from [`InvalidHttpStatus::into_error`].
    pub fn with_status(mut self, status: u16) -> Result<Self, InvalidHttpStatus> {
        if !(100..=599).contains(&status) {
            return Err(InvalidHttpStatus {
                status,
                error: Box::new(self),
            });
        }
        self.remote_status = Some(status);
        Ok(self)
    }

    /// Attach structured context.
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.code.name()
    }

    /// Client-facing message, empty when unset.
    pub fn client_msg(&self) -> &str {
        self.client_msg.as_deref().unwrap_or_default()
    }

    /// The overriding status if one was applied, else the category default.
    pub fn http_status(&self) -> u16 {
        self.remote_status.unwrap_or(self.code.http_status())
    }

    pub fn remote_status(&self) -> Option<u16> {
        self.remote_status
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }
}

impl From<ErrorCode> for DomainError {
    fn from(code: ErrorCode) -> Self {
        Self {
            code,
            cause: None,
            client_msg: None,
            remote_status: None,
            detail: None,
        }
    }
}

/// Internal log form: remote status, native cause and client message joined
/// by `": "`, skipping whichever are absent.
impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(status) = self.remote_status {
            parts.push(status.to_string());
        }
        if let Some(cause) = &self.cause {
            parts.push(cause.to_string());
        }
        if let Some(msg) = self.client_msg.as_deref().filter(|m| !m.is_empty()) {
            parts.push(msg.to_owned());
        }
        f.write_str(&parts.join(": "))
    }
}

impl StdError for DomainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn StdError + 'static))
    }
}

/// Returned by [`DomainError::with_status`] for an out-of-range status.
#[derive(Debug, Error)]
#[error("invalid HTTP status code: {status}")]
pub struct InvalidHttpStatus {
    status: u16,
    error: Box<DomainError>,
}

impl InvalidHttpStatus {
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The error the status was meant for, unchanged.
    pub fn into_error(self) -> DomainError {
        *self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_per_code() {
        let expected = [500, 403, 401, 404, 400, 502];
        for (code, status) in ErrorCode::ALL.into_iter().zip(expected) {
            assert_eq!(DomainError::new(code, "boom").http_status(), status);
            assert_eq!(DomainError::from(code).http_status(), status);
        }
    }

    #[test]
    fn with_status_overrides_default() {
        let err = DomainError::new(ErrorCode::RemoteProcess, "upstream")
            .with_status(503)
            .unwrap();
        assert_eq!(err.http_status(), 503);
        assert_eq!(err.remote_status(), Some(503));
        assert_eq!(err.to_string(), "503: upstream");
    }

    #[test]
    fn with_status_rejects_out_of_range() {
        for bad in [0, 99, 600, 999] {
            let rejected = DomainError::new(ErrorCode::ResourceNotFound, "gone")
                .with_status(bad)
                .unwrap_err();
            assert_eq!(rejected.status(), bad);

            let err = rejected.into_error();
            assert_eq!(err.http_status(), 404);
            assert_eq!(err.remote_status(), None);
        }
    }

    #[test]
    fn with_status_accepts_bounds() {
        for ok in [100, 599] {
            let err = DomainError::from(ErrorCode::InternalProcess)
                .with_status(ok)
                .unwrap();
            assert_eq!(err.http_status(), ok);
        }
    }

    #[test]
    fn new_is_idempotent() {
        let inner = DomainError::new(ErrorCode::ResourceNotFound, "no rows")
            .with_msg("user not found");
        let outer = DomainError::new(ErrorCode::RemoteProcess, inner);

        assert_eq!(outer.code(), ErrorCode::ResourceNotFound);
        assert_eq!(outer.http_status(), 404);
        assert_eq!(outer.client_msg(), "user not found");
        assert_eq!(outer.to_string(), "no rows: user not found");
    }

    #[test]
    fn display_skips_missing_parts() {
        assert_eq!(DomainError::from(ErrorCode::InternalProcess).to_string(), "");
        assert_eq!(
            DomainError::from(ErrorCode::ParameterInvalid)
                .with_msg("email is required")
                .to_string(),
            "email is required"
        );
        assert_eq!(
            DomainError::new(ErrorCode::RemoteProcess, "connection reset")
                .with_status(504)
                .unwrap()
                .with_msg("try again later")
                .to_string(),
            "504: connection reset: try again later"
        );
    }

    #[test]
    fn client_msg_empty_when_unset() {
        let err = DomainError::new(ErrorCode::InternalProcess, "secret internals");
        assert_eq!(err.client_msg(), "");
    }

    #[test]
    fn detail_and_source_are_exposed() {
        let io = std::io::Error::other("disk on fire");
        let detail = Detail::from_iter([("copy_id".to_owned(), serde_json::json!(7))]);
        let err = DomainError::new(ErrorCode::InternalProcess, io).with_detail(detail);

        assert_eq!(
            err.detail().and_then(|d| d.get("copy_id")),
            Some(&serde_json::json!(7))
        );
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("disk on fire")
        );
        assert!(DomainError::from(ErrorCode::InternalProcess).source().is_none());
    }

    #[test]
    fn code_names_are_stable() {
        assert_eq!(ErrorCode::RemoteProcess.name(), "REMOTE_PROCESS_ERROR");
        assert_eq!(ErrorCode::ResourceNotFound.to_string(), "RESOURCE_NOT_FOUND");
        assert_eq!(
            serde_json::to_string(&ErrorCode::ParameterInvalid).unwrap(),
            "\"PARAMETER_INVALID\""
        );
    }
}
