//! Model Context Protocol static resource providers
//!
//! Exposes fixed text/JSON payloads under `resource://` URIs, plus a
//! `{topic}` documentation wildcard. Content is produced fresh per read;
//! nothing is cached or persisted.

use std::thread;

use chrono::Local;
use serde::Serialize;
use serde_json::json;

use crate::errors::AppError;

pub const WELCOME_URI: &str = "resource://welcome";
pub const SYSTEM_INFO_URI: &str = "resource://system/info";
pub const SERVER_CONFIG_URI: &str = "resource://config/server";
pub const DOCS_TEMPLATE_URI: &str = "resource://docs/{topic}";
pub const API_REFERENCE_URI: &str = "resource://api/reference";

const DOCS_URI_PREFIX: &str = "resource://docs/";
const DOC_TOPICS: [&str; 4] = ["tools", "resources", "prompts", "getting-started"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

pub fn build_resources_list() -> Vec<ResourceDescriptor> {
    vec![
        ResourceDescriptor {
            uri: WELCOME_URI,
            name: "Welcome Message",
            description: "A welcome message for new users",
            mime_type: "text/plain",
        },
        ResourceDescriptor {
            uri: SYSTEM_INFO_URI,
            name: "System Information",
            description: "Current system information including time and runtime details",
            mime_type: "application/json",
        },
        ResourceDescriptor {
            uri: SERVER_CONFIG_URI,
            name: "Server Configuration",
            description: "Current server configuration and capabilities",
            mime_type: "application/json",
        },
        ResourceDescriptor {
            uri: DOCS_TEMPLATE_URI,
            name: "Documentation",
            description: "Documentation for various topics. Available topics: tools, resources, prompts, getting-started",
            mime_type: "text/markdown",
        },
        ResourceDescriptor {
            uri: API_REFERENCE_URI,
            name: "API Reference",
            description: "Quick reference guide for all available MCP tools",
            mime_type: "text/plain",
        },
    ]
}

/// Resolves a URI to its content. Unknown topics under the docs wildcard are
/// a successful read describing the available topics; any other unknown URI
/// is a read failure.
pub fn read_resource(uri: &str) -> Result<ResourceContent, AppError> {
    if let Some(topic) = uri.strip_prefix(DOCS_URI_PREFIX) {
        return Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "text/markdown",
            text: documentation_for(topic),
        });
    }

    match uri {
        WELCOME_URI => Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "text/plain",
            text: format!(
                "Welcome to {}! This server provides tools, resources, and prompts via the Model Context Protocol.",
                env!("CARGO_PKG_NAME")
            ),
        }),
        SYSTEM_INFO_URI => Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "application/json",
            text: system_info_json(),
        }),
        SERVER_CONFIG_URI => Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "application/json",
            text: server_config_json(),
        }),
        API_REFERENCE_URI => Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "text/plain",
            text: api_reference_text(),
        }),
        _ => Err(AppError::resource_read(format!("Unknown resource: {uri}"))),
    }
}

fn system_info_json() -> String {
    let available_processors = thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1);

    json!({
        "timestamp": Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        "serverName": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "availableProcessors": available_processors,
    })
    .to_string()
}

fn server_config_json() -> String {
    json!({
        "name": env!("CARGO_PKG_NAME"),
        "protocol": "STATELESS",
        "capabilities": {
            "tools": true,
            "resources": true,
            "prompts": true,
            "logging": true,
        },
        "endpoints": {
            "mcp": "/mcp",
            "health": "/health",
        },
    })
    .to_string()
}

fn documentation_for(topic: &str) -> String {
    match topic.to_ascii_lowercase().as_str() {
        "tools" => "# MCP Tools\n\n\
            Tools are executable functions that clients can invoke through the MCP protocol.\n\n\
            ## Available Tools\n\
            - Calculator operations (add, subtract, multiply, divide)\n\
            - Utility functions (echo, get_current_time, random_number)\n\n\
            ## Usage\n\
            Tools can be called by MCP clients with the appropriate parameters.\n"
            .to_string(),
        "resources" => "# MCP Resources\n\n\
            Resources are read-only data or content that clients can access.\n\n\
            ## Available Resources\n\
            - resource://welcome - Welcome message\n\
            - resource://system/info - System information\n\
            - resource://config/server - Server configuration\n\
            - resource://docs/{topic} - Documentation\n\n\
            ## Usage\n\
            Resources can be read by MCP clients using the resource URI.\n"
            .to_string(),
        "prompts" => "# MCP Prompts\n\n\
            Prompts are reusable templates that help structure interactions with language models.\n\n\
            ## Available Prompts\n\
            Check prompts/list for the available prompt templates.\n\n\
            ## Usage\n\
            Prompts can be retrieved and used with parameters by MCP clients.\n"
            .to_string(),
        "getting-started" => "# Getting Started\n\n\
            ## Overview\n\
            This server implements the Model Context Protocol (MCP) over a single JSON-RPC endpoint.\n\n\
            ## Components\n\
            1. **Tools**: Executable functions\n\
            2. **Resources**: Read-only data\n\
            3. **Prompts**: Reusable templates\n\n\
            ## Endpoints\n\
            - MCP Server: POST /mcp\n\
            - Health Check: GET /health\n\n\
            ## Building\n\
            ```bash\n\
            cargo build --release\n\
            ```\n\n\
            ## Running\n\
            ```bash\n\
            cargo run\n\
            ```\n"
            .to_string(),
        other => format!(
            "Documentation topic '{other}' not found. Available topics: {}",
            DOC_TOPICS.join(", ")
        ),
    }
}

fn api_reference_text() -> String {
    format!(
        "=== {} API Reference ===\n\n\
        TOOLS:\n\
        - add(a, b): Add two numbers\n\
        - subtract(a, b): Subtract b from a\n\
        - multiply(a, b): Multiply two numbers\n\
        - divide(a, b): Divide a by b\n\
        - echo(message): Echo back a message\n\
        - get_current_time(timezone): Get current date/time\n\
        - random_number(min, max): Generate random number\n\
        - calculator(operation, a, b): Generic arithmetic entry point\n\n\
        RESOURCES:\n\
        - resource://welcome: Welcome message\n\
        - resource://system/info: System information (JSON)\n\
        - resource://config/server: Server configuration (JSON)\n\
        - resource://docs/{{topic}}: Documentation by topic\n\
        - resource://api/reference: This API reference\n\n\
        PROMPTS:\n\
        - See prompts/list for available templates\n\n\
        Server Version: {}\n\
        Protocol: MCP (Model Context Protocol)\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::{build_resources_list, read_resource, SYSTEM_INFO_URI, WELCOME_URI};

    #[test]
    fn catalog_lists_five_well_formed_descriptors() {
        let resources = build_resources_list();
        assert_eq!(resources.len(), 5);
        for resource in &resources {
            assert!(!resource.uri.is_empty());
            assert!(!resource.name.is_empty());
            assert!(!resource.description.is_empty());
            assert!(!resource.mime_type.is_empty());
        }
    }

    #[test]
    fn every_static_uri_reads_with_its_declared_mime_type() {
        for descriptor in build_resources_list() {
            let uri = if descriptor.uri == super::DOCS_TEMPLATE_URI {
                "resource://docs/tools"
            } else {
                descriptor.uri
            };
            let content = read_resource(uri).expect("cataloged resource");
            assert_eq!(content.mime_type, descriptor.mime_type);
            assert!(!content.text.is_empty());
        }
    }

    #[test]
    fn welcome_resource_is_plain_text() {
        let content = read_resource(WELCOME_URI).expect("welcome resource");
        assert_eq!(content.mime_type, "text/plain");
        assert!(content.text.contains("Model Context Protocol"));
    }

    #[test]
    fn system_info_is_valid_json() {
        let content = read_resource(SYSTEM_INFO_URI).expect("system info resource");
        assert_eq!(content.mime_type, "application/json");
        let parsed: serde_json::Value =
            serde_json::from_str(&content.text).expect("valid json payload");
        assert!(parsed["availableProcessors"].as_u64().is_some());
    }

    #[test]
    fn known_docs_topic_renders_markdown() {
        let content = read_resource("resource://docs/tools").expect("docs resource");
        assert_eq!(content.mime_type, "text/markdown");
        assert!(content.text.starts_with("# MCP Tools"));
    }

    #[test]
    fn docs_topic_lookup_is_case_insensitive() {
        let content = read_resource("resource://docs/Tools").expect("docs resource");
        assert!(content.text.starts_with("# MCP Tools"));
    }

    #[test]
    fn unknown_docs_topic_is_a_successful_read() {
        let content =
            read_resource("resource://docs/unknown-topic").expect("soft wildcard fallback");
        assert!(content.text.contains("not found"));
        assert!(content
            .text
            .contains("Available topics: tools, resources, prompts, getting-started"));
    }

    #[test]
    fn unknown_uri_outside_wildcard_fails() {
        let error = read_resource("resource://nope").expect_err("unknown uri");
        assert_eq!(
            error.to_string(),
            "Resource read error: Unknown resource: resource://nope"
        );
    }
}
