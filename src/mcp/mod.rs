//! Model Context Protocol (MCP) server handling and JSON-RPC implementations
//!
//! Provides envelope parsing, method dispatch, and result/error formatting.

pub mod rpc;
pub mod server;
