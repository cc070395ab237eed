use http::StatusCode;
use hyper::ext::ReasonPhrase;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::cancellable;
use crate::{ApiError, ServiceErrorPayload};

/// Classifies a non-success response into an [`ApiError`].
///
/// - no content (length zero or unknown): [`ApiError::Http`]
/// - a body decoding into a [`ServiceErrorPayload`]: [`ApiError::Service`]
/// - a `null` or malformed body: [`ApiError::Http`], the decode error is dropped
///
/// Never fails: any body that is not a service error degrades to an HTTP error.
/// That error carries `reason`, the phrase sent by the server. Without one, it
/// falls back to the canonical phrase of the status, then to
/// [`UNKNOWN_ERROR`](crate::UNKNOWN_ERROR).
///
/// ```rust
/// use http::StatusCode;
/// use tyrest_core::{ApiError, classify};
///
/// let body = br#"{"message": "Missing Access", "code": 50001}"#;
/// let error = classify(StatusCode::FORBIDDEN, None, Some(body.len() as u64), body);
/// assert!(error.is_service());
///
/// let error = classify(StatusCode::FORBIDDEN, None, Some(4), b"oops");
/// assert_eq!(error, ApiError::from_status(StatusCode::FORBIDDEN));
///
/// let error = classify(StatusCode::TOO_MANY_REQUESTS, Some("Slow Down"), None, b"");
/// assert_eq!(error.message(), "Slow Down");
/// ```
pub fn classify(
    status: StatusCode,
    reason: Option<&str>,
    content_length: Option<u64>,
    body: &[u8],
) -> ApiError {
    let reason = reason.or_else(|| status.canonical_reason());
    if matches!(content_length, None | Some(0)) {
        return ApiError::http(reason, status);
    }

    match serde_json::from_slice::<Option<ServiceErrorPayload>>(body) {
        Ok(Some(payload)) => ApiError::service(status, payload),
        Ok(None) => {
            debug!(%status, "null error body");
            ApiError::http(reason, status)
        }
        Err(error) => {
            debug!(%status, %error, "error body is not a service error");
            ApiError::http(reason, status)
        }
    }
}

/// The reason phrase received on the status line.
///
/// Only available over HTTP/1 when it differs from the canonical phrase.
fn received_reason(response: &reqwest::Response) -> Option<String> {
    let phrase = response.extensions().get::<ReasonPhrase>()?;
    std::str::from_utf8(phrase.as_bytes()).ok().map(str::to_string)
}

/// Reads the body of a failure response and classifies it.
///
/// A failure while reading the body is a transport failure, reported as
/// [`ApiError::Exception`].
pub(in crate::client) async fn classify_response(
    response: reqwest::Response,
    cancellation: &CancellationToken,
) -> ApiError {
    let status = response.status();
    let reason = received_reason(&response);
    let content_length = response.content_length();
    if matches!(content_length, None | Some(0)) {
        return classify(status, reason.as_deref(), content_length, &[]);
    }

    match cancellable(cancellation, response.bytes()).await {
        Ok(body) => classify(status, reason.as_deref(), content_length, &body),
        Err(error) => ApiError::from(error),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn length(body: &[u8]) -> Option<u64> {
        Some(body.len() as u64)
    }

    fn response(status: StatusCode, body: &'static str) -> reqwest::Response {
        let response = http::Response::builder()
            .status(status)
            .body(bytes::Bytes::from_static(body.as_bytes()))
            .expect("valid response");
        reqwest::Response::from(response)
    }

    #[rstest]
    #[case::no_length(None)]
    #[case::zero_length(Some(0))]
    fn should_classify_empty_body_as_http(#[case] content_length: Option<u64>) {
        let error = classify(StatusCode::TOO_MANY_REQUESTS, None, content_length, b"");

        insta::allow_duplicates! {
            insta::assert_debug_snapshot!(error, @r#"
            Http {
                reason: "Too Many Requests",
                status: 429,
            }
            "#);
        }
    }

    #[test]
    fn should_fallback_to_unknown_reason() {
        let status = StatusCode::from_u16(520).expect("valid status");

        let error = classify(status, None, Some(0), b"");

        assert_eq!(error.message(), crate::UNKNOWN_ERROR);
        assert_eq!(error.status(), Some(status));
    }

    #[rstest]
    #[case::registered(429, "Slow Down Please")]
    #[case::unregistered(599, "Network Connect Timeout")]
    fn should_keep_received_reason(#[case] status: u16, #[case] reason: &str) {
        let status = StatusCode::from_u16(status).expect("valid status");

        let error = classify(status, Some(reason), Some(0), b"");

        assert_eq!(error, ApiError::http(Some(reason), status));
    }

    #[test]
    fn should_classify_service_error() {
        let body = br#"{"message": "Unknown Channel", "code": 10003}"#;

        let error = classify(StatusCode::NOT_FOUND, None, length(body), body);

        assert_eq!(
            error,
            ApiError::service(
                StatusCode::NOT_FOUND,
                ServiceErrorPayload::new("Unknown Channel").with_code(10_003)
            )
        );
    }

    #[rstest]
    #[case::null(b"null".as_slice())]
    #[case::malformed(b"<html>Bad Gateway</html>".as_slice())]
    #[case::wrong_schema(br#"{"error": "no message field"}"#.as_slice())]
    #[case::truncated(br#"{"message": "#.as_slice())]
    fn should_degrade_to_http(#[case] body: &[u8]) {
        let error = classify(StatusCode::BAD_GATEWAY, None, length(body), body);

        assert_eq!(error, ApiError::http(Some("Bad Gateway"), StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn should_classify_response_body() {
        let response = response(StatusCode::FORBIDDEN, r#"{"message":"Missing Access"}"#);

        let error = classify_response(response, &CancellationToken::new()).await;

        insta::assert_snapshot!(error, @"Service error (HTTP 403): Missing Access");
    }

    #[tokio::test]
    async fn should_report_cancelled_body_read() {
        let token = CancellationToken::new();
        token.cancel();
        let response = response(StatusCode::FORBIDDEN, r#"{"message":"Missing Access"}"#);

        let error = classify_response(response, &token).await;

        assert!(error.is_cancelled());
    }
}
