//! Axum HTTP handlers for the web server
//!
//! Provides the primary Model Context Protocol endpoint, and general metadata
//! endpoints. Malformed bodies are resolved here, before the dispatcher.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::mcp::rpc::{JsonRpcRequest, JsonRpcResponse};
use crate::mcp::server::handle_request;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub mcp_endpoint: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery() -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        mcp_endpoint: "/mcp",
    })
}

pub async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::OK,
                Json(JsonRpcResponse::failure(Value::Null, -32700, "Parse error")),
            )
                .into_response()
        }
    };

    let request_id = payload.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(_) => {
            return (
                StatusCode::OK,
                Json(JsonRpcResponse::failure(
                    request_id,
                    -32600,
                    "Invalid Request",
                )),
            )
                .into_response()
        }
    };

    (StatusCode::OK, Json(handle_request(&state, request))).into_response()
}
