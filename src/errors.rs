use thiserror::Error;

/// Handler failures, resolved to JSON-RPC error envelopes by the mapper in
/// `mcp::rpc`. Each variant carries its context prefix in the display form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    #[error("Tool execution error: {0}")]
    ToolExecution(String),
    #[error("Resource read error: {0}")]
    ResourceRead(String),
    #[error("Prompt error: {0}")]
    Prompt(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound(method.into())
    }

    pub fn tool_execution(message: impl Into<String>) -> Self {
        Self::ToolExecution(message.into())
    }

    pub fn resource_read(message: impl Into<String>) -> Self {
        Self::ResourceRead(message.into())
    }

    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Unrecognized methods map to -32601; every other failure class maps
    /// to -32603.
    pub fn json_rpc_code(&self) -> i64 {
        match self {
            Self::MethodNotFound(_) => -32601,
            Self::ToolExecution(_)
            | Self::ResourceRead(_)
            | Self::Prompt(_)
            | Self::Internal(_) => -32603,
        }
    }
}
