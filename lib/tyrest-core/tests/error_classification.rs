#![allow(missing_docs)]

use http::StatusCode;
use rstest::rstest;

use tyrest_core::{ApiError, ServiceErrorPayload, UNKNOWN_ERROR};

mod common;
pub use self::common::*;

#[rstest]
#[tokio::test]
async fn should_classify_service_error(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let result = app
        .get("/channels/{id}")
        .with_path_param("id", &UNKNOWN_CHANNEL_ID)
        .entity::<Channel>()
        .await?;

    assert!(!result.is_success());
    let error = result.error().expect("a failed result");
    insta::assert_snapshot!(error, @"Service error (HTTP 404): Unknown Channel");
    assert_eq!(error.service_payload().and_then(|payload| payload.code), Some(10_003));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_keep_structured_error_detail(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let new_channel = NewChannel {
        name: String::new(),
        topic: None,
    };

    let error = app
        .post("/channels")
        .json(&new_channel)
        .entity::<Channel>()
        .await?
        .into_error()?;

    let payload = error.service_payload().expect("a service error");
    assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(payload.message, "Invalid Form Body");
    assert_eq!(
        payload.errors,
        Some(serde_json::json!({
            "name": {
                "_errors": [{ "code": "BASE_TYPE_REQUIRED", "message": "This field is required" }]
            }
        }))
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_keep_extra_envelope_fields(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let error = app.get("/errors/rate-limited").send().await.into_error()?;

    let payload = error.service_payload().expect("a service error");
    assert_eq!(payload.message, "You are being rate limited.");
    assert_eq!(payload.code, None);
    assert_eq!(payload.extra.get("retry_after"), Some(&serde_json::json!(0.5)));
    assert_eq!(payload.extra.get("global"), Some(&serde_json::json!(false)));

    Ok(())
}

#[rstest]
#[case::bare("/errors/bare", StatusCode::FORBIDDEN, "Forbidden")]
#[case::malformed("/errors/malformed", StatusCode::BAD_GATEWAY, "Bad Gateway")]
#[case::null("/errors/null", StatusCode::BAD_REQUEST, "Bad Request")]
#[tokio::test]
async fn should_degrade_to_http_error(
    #[future] app: TestApp,
    #[case] path: &str,
    #[case] status: StatusCode,
    #[case] reason: &str,
) -> anyhow::Result<()> {
    let app = app.await;

    let operation = app.get(path).await;
    let entity = app.get(path).optional_entity::<Channel>().await;

    let expected = ApiError::http(Some(reason), status);
    assert_eq!(operation.error(), Some(&expected));
    assert_eq!(entity.error(), Some(&expected));

    Ok(())
}

#[rstest]
#[case::registered("HTTP/1.1 429 Slow Down Please", 429, "Slow Down Please")]
#[case::unregistered("HTTP/1.1 599 Network Connect Timeout", 599, "Network Connect Timeout")]
#[case::canonical("HTTP/1.1 503 Service Unavailable", 503, "Service Unavailable")]
#[tokio::test]
async fn should_keep_reason_phrase_from_status_line(
    #[case] status_line: &'static str,
    #[case] status: u16,
    #[case] reason: &str,
) -> anyhow::Result<()> {
    init_tracing();
    let (client, server) = status_line_client(status_line).await?;

    let operation = client.get("/channels").send().await;
    let entity = client.get("/channels").optional_entity::<Vec<Channel>>().await;
    server.abort();

    let expected = ApiError::http(Some(reason), StatusCode::from_u16(status)?);
    assert_eq!(operation.error(), Some(&expected));
    assert_eq!(entity.error(), Some(&expected));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_fallback_to_unknown_error(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let error = app.get("/errors/unknown-status").send().await.into_error()?;

    assert!(error.is_http());
    assert_eq!(error.message(), UNKNOWN_ERROR);
    assert_eq!(error.status().map(|status| status.as_u16()), Some(599));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_report_undecodable_entity_as_exception(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let error = app
        .get("/gateway/malformed")
        .entity::<Channel>()
        .await?
        .into_error()?;

    assert!(error.is_exception());
    assert!(matches!(
        error.cause(),
        Some(tyrest_core::ClientError::JsonError { path, .. }) if path == "id"
    ));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_compare_service_errors_by_value(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let first = app
        .delete("/channels/{id}")
        .with_path_param("id", &UNKNOWN_CHANNEL_ID)
        .send()
        .await;
    let second = app
        .get("/channels/{id}")
        .with_path_param("id", &UNKNOWN_CHANNEL_ID)
        .send()
        .await;

    assert_eq!(first, second);
    assert_eq!(
        first.into_error()?,
        ApiError::service(
            StatusCode::NOT_FOUND,
            ServiceErrorPayload::new("Unknown Channel").with_code(10_003)
        )
    );

    Ok(())
}
