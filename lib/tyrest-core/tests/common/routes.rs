#![allow(dead_code, missing_docs, clippy::missing_errors_doc)]
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Path, RawQuery};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const UNKNOWN_CHANNEL_ID: u64 = 404;
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    pub name: String,
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChannel {
    pub name: String,
    pub topic: Option<String>,
}

/// What the server received, as seen by the echo route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub user_agent: Option<String>,
    pub audit_reason: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

pub fn router() -> Router {
    let api = Router::new()
        .route("/channels", get(list_channels).post(create_channel))
        .route(
            "/channels/{id}",
            get(get_channel)
                .put(replace_channel)
                .patch(update_channel)
                .delete(delete_channel),
        )
        .route("/channels/{id}/pins/{message_id}", axum::routing::put(pin).delete(unpin))
        .route("/gateway/null", get(null_body))
        .route("/gateway/empty", get(empty_body))
        .route("/gateway/malformed", get(malformed_entity))
        .route("/errors/bare", get(bare_error))
        .route("/errors/malformed", get(malformed_error))
        .route("/errors/null", get(null_error))
        .route("/errors/rate-limited", get(rate_limited))
        .route("/errors/unknown-status", get(unknown_status))
        .route("/slow/headers", get(slow_headers))
        .route("/slow/body", get(slow_body))
        .route("/files/{name}", get(file))
        .route("/echo", any(echo));

    Router::new().nest("/api", api)
}

fn channel(id: u64, name: &str) -> Channel {
    Channel {
        id,
        name: name.to_string(),
        topic: None,
    }
}

fn unknown_channel() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Unknown Channel", "code": 10003 })),
    )
        .into_response()
}

async fn list_channels() -> Json<Vec<Channel>> {
    Json(vec![channel(1, "general"), channel(2, "random")])
}

async fn create_channel(Json(new_channel): Json<NewChannel>) -> Response {
    if new_channel.name.is_empty() {
        let body = json!({
            "message": "Invalid Form Body",
            "code": 50035,
            "errors": {
                "name": { "_errors": [{ "code": "BASE_TYPE_REQUIRED", "message": "This field is required" }] }
            }
        });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let created = Channel {
        id: 1073,
        name: new_channel.name,
        topic: new_channel.topic,
    };
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn get_channel(Path(id): Path<u64>) -> Response {
    if id == UNKNOWN_CHANNEL_ID {
        return unknown_channel();
    }
    Json(channel(id, "general")).into_response()
}

async fn replace_channel(Path(id): Path<u64>, Json(new_channel): Json<NewChannel>) -> Response {
    if id == UNKNOWN_CHANNEL_ID {
        return unknown_channel();
    }
    Json(Channel {
        id,
        name: new_channel.name,
        topic: new_channel.topic,
    })
    .into_response()
}

async fn update_channel(Path(id): Path<u64>, Json(patch): Json<serde_json::Value>) -> Response {
    if id == UNKNOWN_CHANNEL_ID {
        return unknown_channel();
    }
    let mut updated = channel(id, "general");
    if let Some(topic) = patch.get("topic").and_then(serde_json::Value::as_str) {
        updated.topic = Some(topic.to_string());
    }
    Json(updated).into_response()
}

async fn delete_channel(Path(id): Path<u64>) -> Response {
    if id == UNKNOWN_CHANNEL_ID {
        return unknown_channel();
    }
    Json(channel(id, "general")).into_response()
}

async fn pin() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn unpin(Path((id, _message_id)): Path<(u64, u64)>) -> Response {
    if id == UNKNOWN_CHANNEL_ID {
        return unknown_channel();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn null_body() -> Response {
    ([(CONTENT_TYPE, "application/json")], "null").into_response()
}

async fn empty_body() -> StatusCode {
    StatusCode::OK
}

async fn malformed_entity() -> Response {
    ([(CONTENT_TYPE, "application/json")], r#"{"id": "not-a-number"}"#).into_response()
}

async fn bare_error() -> StatusCode {
    StatusCode::FORBIDDEN
}

async fn malformed_error() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(CONTENT_TYPE, "text/html")],
        "<html><body>502 Bad Gateway</body></html>",
    )
        .into_response()
}

async fn null_error() -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(CONTENT_TYPE, "application/json")],
        "null",
    )
        .into_response()
}

async fn rate_limited() -> Response {
    let body = json!({
        "message": "You are being rate limited.",
        "retry_after": 0.5,
        "global": false
    });
    (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response()
}

async fn unknown_status() -> Response {
    let status = StatusCode::from_u16(599).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    status.into_response()
}

async fn slow_headers() -> Json<Channel> {
    tokio::time::sleep(Duration::from_secs(30)).await;
    Json(channel(1, "general"))
}

async fn slow_body() -> Response {
    let first = futures::stream::once(async { Ok::<_, std::io::Error>(Bytes::from_static(b"[1,")) });
    let stream = first.chain(futures::stream::pending());
    ([(CONTENT_TYPE, "application/json")], Body::from_stream(stream)).into_response()
}

async fn file(Path(name): Path<String>) -> Response {
    if name.ends_with(".png") {
        ([(CONTENT_TYPE, "image/png")], PNG_BYTES).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn echo(method: Method, RawQuery(query): RawQuery, headers: HeaderMap, body: String) -> Json<Echo> {
    Json(Echo {
        method: method.to_string(),
        query,
        user_agent: header(&headers, "user-agent"),
        audit_reason: header(&headers, "x-audit-log-reason"),
        content_type: header(&headers, "content-type"),
        body,
    })
}
