//! The central Model Context Protocol engine
//!
//! Parses the generic JSON-RPC envelope, dispatches on the closed method set,
//! runs the schema-validated tool invocation pipeline, and packages every
//! outcome into a response envelope. Stateless: each call is independent and
//! nothing escapes the dispatcher boundary.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::domain::{prompts, resources, tools};
use crate::errors::AppError;
use crate::mcp::rpc::{JsonRpcRequest, JsonRpcResponse};
use crate::schema::{self, ValidationError};
use crate::AppState;

pub const SUPPORTED_PROTOCOL_VERSION: &str = "2024-11-05";

/// The closed set of supported methods. Adding or removing a method is a
/// compile-time-checked change to this enum, not a string fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
    PromptsList,
    PromptsGet,
}

impl Method {
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "initialize" => Some(Self::Initialize),
            "tools/list" => Some(Self::ToolsList),
            "tools/call" => Some(Self::ToolsCall),
            "resources/list" => Some(Self::ResourcesList),
            "resources/read" => Some(Self::ResourcesRead),
            "prompts/list" => Some(Self::PromptsList),
            "prompts/get" => Some(Self::PromptsGet),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult {
    protocol_version: &'static str,
    server_info: ServerInfo,
    capabilities: Capabilities,
}

#[derive(Debug, Serialize)]
struct ServerInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct Capabilities {
    tools: ToolsCapability,
    resources: ResourcesCapability,
    prompts: PromptsCapability,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolsCapability {
    list_changed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourcesCapability {
    subscribe: bool,
    list_changed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptsCapability {
    list_changed: bool,
}

/// Handles one request envelope and always produces a response envelope.
pub fn handle_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let JsonRpcRequest { method, params, id } = request;

    let outcome = match Method::parse(&method) {
        Some(Method::Initialize) => initialize_result(),
        Some(Method::ToolsList) => tools_list_result(state),
        Some(Method::ToolsCall) => handle_tools_call(state, params.as_ref()),
        Some(Method::ResourcesList) => resources_list_result(),
        Some(Method::ResourcesRead) => handle_resources_read(params.as_ref()),
        Some(Method::PromptsList) => prompts_list_result(state),
        Some(Method::PromptsGet) => handle_prompts_get(state, params.as_ref()),
        None => Err(AppError::method_not_found(method.as_str())),
    };

    let response = match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(error) => JsonRpcResponse::from_app_error(id, error),
    };

    info!(
        method = %method,
        id = %response.id,
        outcome = if response.is_error() { "failure" } else { "success" },
        "mcp request handled"
    );

    response
}

fn initialize_result() -> Result<Value, AppError> {
    to_result_value(&InitializeResult {
        protocol_version: SUPPORTED_PROTOCOL_VERSION,
        server_info: ServerInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
        capabilities: Capabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
            resources: ResourcesCapability {
                subscribe: false,
                list_changed: false,
            },
            prompts: PromptsCapability {
                list_changed: false,
            },
        },
    })
}

fn tools_list_result(state: &AppState) -> Result<Value, AppError> {
    Ok(json!({ "tools": to_result_value(&state.tools.list())? }))
}

fn resources_list_result() -> Result<Value, AppError> {
    Ok(json!({ "resources": to_result_value(&resources::build_resources_list())? }))
}

fn prompts_list_result(state: &AppState) -> Result<Value, AppError> {
    Ok(json!({ "prompts": to_result_value(&state.prompts.list())? }))
}

fn handle_tools_call(state: &AppState, params: Option<&Value>) -> Result<Value, AppError> {
    let params = params
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::tool_execution("tools/call params must be an object"))?;
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::tool_execution("tool name is required"))?;
    let entry = state
        .tools
        .resolve(name)
        .ok_or_else(|| AppError::tool_execution(format!("Unknown tool: {name}")))?;

    let arguments = arguments_object(params).map_err(|err| AppError::tool_execution(err.to_string()))?;
    let args = schema::validate(&entry.input_schema, &arguments)
        .map_err(|err| AppError::tool_execution(err.to_string()))?;
    let text = tools::execute_tool(entry, &args, state.entropy.as_ref())
        .map_err(|err| AppError::tool_execution(err.to_string()))?;

    Ok(json!({
        "content": [{ "type": "text", "text": text }]
    }))
}

fn handle_resources_read(params: Option<&Value>) -> Result<Value, AppError> {
    let uri = params
        .and_then(Value::as_object)
        .and_then(|object| object.get("uri"))
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::resource_read("resource uri is required"))?;

    let content = resources::read_resource(uri)?;
    Ok(json!({ "contents": [to_result_value(&content)?] }))
}

fn handle_prompts_get(state: &AppState, params: Option<&Value>) -> Result<Value, AppError> {
    let params = params
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::prompt("prompts/get params must be an object"))?;
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::prompt("prompt name is required"))?;
    let entry = state
        .prompts
        .resolve(name)
        .ok_or_else(|| AppError::prompt(format!("Unknown prompt: {name}")))?;

    let arguments = arguments_object(params).map_err(|err| AppError::prompt(err.to_string()))?;
    let text = prompts::render_prompt(entry, &arguments)
        .map_err(|err| AppError::prompt(err.to_string()))?;

    Ok(json!({
        "description": entry.description,
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": text }
        }]
    }))
}

/// The `arguments` member of a call: absent or null means "no arguments",
/// anything other than an object is rejected.
fn arguments_object(params: &Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
    match params.get("arguments") {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(ValidationError::NotAnObject),
    }
}

fn to_result_value<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|err| AppError::internal(err.to_string()))
}
