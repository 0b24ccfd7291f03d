use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod domain;
pub mod entropy;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod schema;

use domain::{prompts::PromptRegistry, tools::ToolRegistry};
use entropy::EntropySource;

/// Process-wide state: immutable catalogs plus the injected entropy source.
/// Registries are built once here and only ever read afterwards, so clones
/// share them without locking.
#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolRegistry>,
    pub prompts: Arc<PromptRegistry>,
    pub entropy: Arc<dyn EntropySource>,
}

impl AppState {
    pub fn new(entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            tools: Arc::new(ToolRegistry::new()),
            prompts: Arc::new(PromptRegistry::new()),
            entropy,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/mcp", get(http::handlers::discovery))
        .route("/mcp", post(http::handlers::mcp_endpoint))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
