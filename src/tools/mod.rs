//! Tool registry and dispatch.
//!
//! Exposes the esa.io operations as six MCP tools. Each tool is an entry of
//! [`implementations`]: a name, a description, a JSON Schema derived from the
//! argument type, and a [`ToolLogic`](executor::ToolLogic) descriptor run
//! through the shared [`ToolExecutor`](executor::ToolExecutor) harness.

pub mod args;
pub mod executor;
pub mod posts;
pub mod user;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::client::EsaClient;
use crate::error::{McpError, Result};
use crate::tools::executor::{BindTool, Tool, ToolLog};

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "create_post")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// One entry of the implementations list, not yet registered.
pub struct ToolEntry<C: Sync> {
    /// Tool name exposed to callers.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema of the arguments.
    pub input_schema: JsonValue,
    /// Descriptor executed by the harness.
    pub logic: Box<dyn BindTool<C>>,
}

impl<C: Sync + 'static> ToolEntry<C> {
    /// Build an entry whose schema comes from the descriptor's argument type.
    pub fn new<L>(name: &str, description: &str, logic: L) -> Self
    where
        L: BindTool<C> + 'static,
    {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: logic.input_schema(),
            logic: Box::new(logic),
        }
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.input_schema.get("type").and_then(JsonValue::as_str) == Some("object")
    }
}

/// Every esa.io tool, keyed by implementation path.
pub fn implementations() -> Vec<(&'static str, ToolEntry<EsaClient>)> {
    vec![
        ("posts/create", posts::create()),
        ("posts/delete", posts::delete()),
        ("posts/get_detail", posts::get_detail()),
        ("posts/get_list", posts::get_list()),
        ("posts/update", posts::update()),
        ("user/get_info", user::get_info()),
    ]
}

/// Registry of available MCP tools.
pub struct ToolRegistry<C: Sync = EsaClient> {
    tools: Vec<ToolDef>,
    handlers: Vec<Box<dyn Tool<C>>>,
}

impl ToolRegistry<EsaClient> {
    /// Register every esa.io tool. Fails if any entry cannot be registered.
    pub fn new() -> Result<Self> {
        Self::from_entries(implementations())
    }
}

impl<C: Sync + 'static> ToolRegistry<C> {
    /// A registry with no tools.
    pub fn empty() -> Self {
        Self {
            tools: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Register all `entries`, stopping at the first failure.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, ToolEntry<C>)>,
    {
        let mut registry = Self::empty();
        for (key, entry) in entries {
            registry.register(key, entry)?;
        }
        Ok(registry)
    }

    /// Register one entry, wrapping its descriptor in the execution harness.
    pub fn register(&mut self, key: &str, entry: ToolEntry<C>) -> Result<()> {
        if !entry.is_complete() {
            return Err(McpError::IncompleteTool {
                key: key.to_string(),
            });
        }

        if self.tools.iter().any(|t| t.name == entry.name) {
            return Err(McpError::Registration {
                name: entry.name,
                key: key.to_string(),
                reason: "a tool with this name is already registered".to_string(),
            });
        }

        let handler = entry.logic.bind(&entry.name);
        self.tools.push(ToolDef {
            name: entry.name,
            description: entry.description,
            input_schema: entry.input_schema,
        });
        self.handlers.push(handler);
        Ok(())
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Dispatch a tool call to the matching handler.
    pub async fn call(
        &self,
        client: &C,
        name: &str,
        args: Map<String, JsonValue>,
        log: &dyn ToolLog,
    ) -> Result<String> {
        let index = self
            .tools
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| McpError::UnknownTool(name.to_string()))?;
        self.handlers[index].call(client, args, log).await
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
#[macro_export]
macro_rules! schema {
    // Object with required and optional properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? },
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@type $req_type));)*
        $(props.insert($opt_name.to_string(), schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only required properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@type $req_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Empty object (no parameters)
    (object {}) => {{
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }};

    // Type mappings
    (@type string) => { serde_json::json!({"type": "string"}) };
    (@type non_empty_string) => { serde_json::json!({"type": "string", "minLength": 1}) };
    (@type boolean) => { serde_json::json!({"type": "boolean"}) };
    (@type post_number) => {
        serde_json::json!({
            "type": "integer",
            "minimum": 1,
            "description": "Post number (positive integer)"
        })
    };
    (@type array_string) => { serde_json::json!({"type": "array", "items": {"type": "string"}}) };
}
