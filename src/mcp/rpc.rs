//! JSON-RPC envelope representations and formatting utilities
//!
//! Provides standardized mapping of internal AppErrors to valid JSON-RPC
//! payloads. Every response carries exactly one of `result`/`error` and
//! echoes the request `id` verbatim, including `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

pub const JSONRPC_VERSION: &str = "2.0";

/// A parsed request envelope. The `id` is opaque: never interpreted, only
/// echoed back. An absent `id` deserializes to `null` and is echoed as such.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Value,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Value,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data: None,
            }),
            id,
        }
    }

    pub fn from_app_error(id: Value, error: AppError) -> Self {
        Self::failure(id, error.json_rpc_code(), error.to_string())
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonRpcRequest, JsonRpcResponse};
    use crate::errors::AppError;
    use serde_json::{json, Value};

    #[test]
    fn success_envelope_has_result_and_no_error() {
        let response = JsonRpcResponse::success(json!(7), json!({"ok": true}));
        let encoded = serde_json::to_value(&response).expect("response serialization");
        assert_eq!(encoded["jsonrpc"], "2.0");
        assert_eq!(encoded["id"], 7);
        assert_eq!(encoded["result"]["ok"], true);
        assert!(encoded.get("error").is_none());
    }

    #[test]
    fn failure_envelope_has_error_and_no_result() {
        let response =
            JsonRpcResponse::from_app_error(json!("abc"), AppError::method_not_found("foo"));
        let encoded = serde_json::to_value(&response).expect("response serialization");
        assert_eq!(encoded["id"], "abc");
        assert_eq!(encoded["error"]["code"], -32601);
        assert_eq!(encoded["error"]["message"], "Method not found: foo");
        assert!(encoded.get("result").is_none());
    }

    #[test]
    fn null_id_is_emitted_not_omitted() {
        let response = JsonRpcResponse::failure(Value::Null, -32700, "Parse error");
        let encoded = serde_json::to_value(&response).expect("response serialization");
        let object = encoded.as_object().expect("envelope object");
        assert_eq!(object.get("id"), Some(&Value::Null));
    }

    #[test]
    fn absent_request_id_parses_as_null() {
        let request: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "tools/list"}))
                .expect("request parses");
        assert_eq!(request.id, Value::Null);
        assert!(request.params.is_none());
    }

    #[test]
    fn business_failures_map_to_internal_error_code() {
        let response = JsonRpcResponse::from_app_error(
            json!(1),
            AppError::tool_execution("Division by zero is not allowed"),
        );
        let encoded = serde_json::to_value(&response).expect("response serialization");
        assert_eq!(encoded["error"]["code"], -32603);
        assert_eq!(
            encoded["error"]["message"],
            "Tool execution error: Division by zero is not allowed"
        );
    }
}
