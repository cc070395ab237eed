use std::sync::Arc;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::ClientError;

/// Reason used when the status code carries no reason phrase.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The error held by a failed [`ApiResult`](super::ApiResult).
///
/// Three independent failure sources are normalized into this single type:
///
/// - [`Exception`](Self::Exception): the transport, the codec or the request
///   builder failed, the call never produced a classified response
/// - [`Http`](Self::Http): the service answered with a non-success status and
///   no structured error body
/// - [`Service`](Self::Service): the service answered with a non-success status
///   and its own JSON error envelope
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
pub enum ApiError {
    /// The call failed before a response could be classified.
    #[display("{message}")]
    Exception {
        /// Display of the cause.
        message: String,
        /// The underlying failure.
        #[error(source)]
        cause: Arc<ClientError>,
    },

    /// Non-success status without a parseable error body.
    #[display("HTTP {} {reason}", status.as_u16())]
    Http {
        /// Reason phrase of the status, or [`UNKNOWN_ERROR`].
        reason: String,
        /// Response status code.
        status: StatusCode,
    },

    /// Non-success status with a service error envelope.
    #[display("Service error (HTTP {}): {message}", status.as_u16())]
    Service {
        /// The service error message.
        message: String,
        /// The full decoded envelope.
        payload: ServiceErrorPayload,
        /// Response status code.
        status: StatusCode,
    },
}

impl ApiError {
    /// Creates an [`ApiError::Http`] from a reason phrase and a status.
    ///
    /// A missing reason falls back to [`UNKNOWN_ERROR`].
    pub fn http(reason: Option<&str>, status: StatusCode) -> Self {
        Self::Http {
            reason: reason.unwrap_or(UNKNOWN_ERROR).to_string(),
            status,
        }
    }

    /// Creates an [`ApiError::Http`] using the canonical reason phrase of the status.
    pub fn from_status(status: StatusCode) -> Self {
        Self::http(status.canonical_reason(), status)
    }

    /// Creates an [`ApiError::Service`] from a decoded error envelope.
    pub fn service(status: StatusCode, payload: ServiceErrorPayload) -> Self {
        Self::Service {
            message: payload.message.clone(),
            payload,
            status,
        }
    }

    /// The HTTP status, if the service answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Exception { .. } => None,
            Self::Http { status, .. } | Self::Service { status, .. } => Some(*status),
        }
    }

    /// The human readable message of this error.
    pub fn message(&self) -> &str {
        match self {
            Self::Exception { message, .. } | Self::Service { message, .. } => message,
            Self::Http { reason, .. } => reason,
        }
    }

    /// The underlying failure of an [`ApiError::Exception`].
    pub fn cause(&self) -> Option<&ClientError> {
        match self {
            Self::Exception { cause, .. } => Some(cause),
            Self::Http { .. } | Self::Service { .. } => None,
        }
    }

    /// The service error envelope of an [`ApiError::Service`].
    pub fn service_payload(&self) -> Option<&ServiceErrorPayload> {
        match self {
            Self::Service { payload, .. } => Some(payload),
            Self::Exception { .. } | Self::Http { .. } => None,
        }
    }

    /// Returns `true` for [`ApiError::Exception`].
    pub fn is_exception(&self) -> bool {
        matches!(self, Self::Exception { .. })
    }

    /// Returns `true` for [`ApiError::Http`].
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Returns `true` for [`ApiError::Service`].
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Returns `true` if the call was cancelled through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.cause(), Some(ClientError::Cancelled))
    }
}

// Exceptions compare by message, their causes are not comparable
impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exception { message: left, .. }, Self::Exception { message: right, .. }) => {
                left == right
            }
            (
                Self::Http {
                    reason: left_reason,
                    status: left_status,
                },
                Self::Http {
                    reason: right_reason,
                    status: right_status,
                },
            ) => left_reason == right_reason && left_status == right_status,
            (
                Self::Service {
                    message: left_message,
                    payload: left_payload,
                    status: left_status,
                },
                Self::Service {
                    message: right_message,
                    payload: right_payload,
                    status: right_status,
                },
            ) => {
                left_message == right_message
                    && left_payload == right_payload
                    && left_status == right_status
            }
            _ => false,
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(cause: ClientError) -> Self {
        Self::Exception {
            message: cause.to_string(),
            cause: Arc::new(cause),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ClientError::from(value).into()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ClientError::from(value).into()
    }
}

impl From<(Option<&str>, StatusCode)> for ApiError {
    fn from((reason, status): (Option<&str>, StatusCode)) -> Self {
        Self::http(reason, status)
    }
}

impl From<StatusCode> for ApiError {
    fn from(status: StatusCode) -> Self {
        Self::from_status(status)
    }
}

impl From<(StatusCode, ServiceErrorPayload)> for ApiError {
    fn from((status, payload): (StatusCode, ServiceErrorPayload)) -> Self {
        Self::service(status, payload)
    }
}

/// The JSON error envelope returned by the service in failure responses.
///
/// Only `message` is required. A numeric `code` and a structured `errors`
/// detail are captured when present; any other field lands in `extra`.
///
/// ```json
/// {
///   "code": 50035,
///   "message": "Invalid Form Body",
///   "errors": { "name": { "_errors": [{ "code": "BASE_TYPE_REQUIRED" }] } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceErrorPayload {
    /// Human readable error message.
    pub message: String,
    /// Service specific error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Structured detail, typically per-field validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    /// Any other field of the envelope.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ServiceErrorPayload {
    /// Creates an envelope holding only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            errors: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Sets the service error code.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Sets the structured error detail.
    pub fn with_errors(mut self, errors: serde_json::Value) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// A caller-contract violation.
///
/// Unlike [`ApiError`], these never describe a server or network condition:
/// they signal a defect in the calling code and are returned outside of the
/// [`ApiResult`](super::ApiResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidStateError {
    /// The payload of a failed result was requested.
    #[display("Invalid state: a failed result has no value")]
    NoValue,

    /// The error of a successful result was requested.
    #[display("Invalid state: a successful result has no error")]
    NoError,

    /// A successful response had an empty or `null` body but the call did not allow it.
    #[display("Invalid state: unexpected empty body with status {status}, null return is not allowed")]
    UnexpectedNullBody {
        /// The successful status code.
        status: StatusCode,
    },
}
