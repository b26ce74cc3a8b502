use std::time::Duration;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// How long `/stall` keeps a request open.
pub const STALL: Duration = Duration::from_secs(3600);

/// Body served by `/bytes/{code}`: not UTF-8, not JSON.
pub const BINARY_BODY: [u8; 4] = [0xff, 0xfe, 0x00, 0x89];

pub fn app() -> Router {
    Router::new()
        .route("/json", get(json_document))
        .route("/text", get(text_document))
        .route("/status/{code}", get(with_status))
        .route("/malformed", get(malformed))
        .route("/bytes/{code}", get(binary_with_status))
        .route("/stall", get(stall))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn sample() -> Value {
    json!({"a": 1})
}

async fn json_document() -> Json<Value> {
    Json(sample())
}

async fn text_document() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], sample().to_string())
}

async fn with_status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(sample()))
}

async fn binary_with_status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    log::debug!("serving binary body with {status}");
    (
        status,
        [(header::CONTENT_TYPE, "application/octet-stream")],
        BINARY_BODY.to_vec(),
    )
}

async fn malformed() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "not json")
}

async fn stall() -> Json<Value> {
    tokio::time::sleep(STALL).await;
    Json(sample())
}
