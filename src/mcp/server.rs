//! MCP server implementation for taxolint.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::context::Context;
use crate::di::FromRef;

const INSTRUCTIONS: &str = r#"taxolint - Taxonomy antipattern checks

Detects AP1: an entity that is both INSTANCE_OF (P31) and transitively
SUBCLASS_OF (P279+) the same class in a Wikidata-style graph.

## Tools

- **check_antipattern** - Report AP1 violations around an entity
  - `up`: classes the entity is both an instance and a subclass of
  - `down`: subclasses of the entity that are also its instances
  - pass `relation` and `object` to see what a new statement would introduce
- **get_labels** - Resolve display labels for entity ids

Results are read-only; the graph is never modified.
"#;

/// taxolint MCP server.
#[derive(Clone)]
pub struct McpServer {
    pub(crate) ctx: Arc<Context>,
    tool_router: ToolRouter<McpServer>,
}

impl McpServer {
    /// Create a new MCP server with the given context.
    pub fn new(ctx: Context) -> Self {
        tracing::info!(endpoint = %ctx.config.sparql.endpoint, "Initializing taxolint MCP server");

        Self {
            ctx: Arc::new(ctx),
            tool_router: Self::antipattern_tools(),
        }
    }

    /// Resolve a dependency from the context.
    pub fn resolve<T: FromRef<Context>>(&self) -> T {
        T::from_ref(&self.ctx)
    }

    /// Get direct access to the context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}
