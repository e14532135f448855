//! # esa-mcp
//!
//! MCP (Model Context Protocol) server for the esa.io team wiki.
//!
//! This crate exposes the esa.io v1 REST API as tools for AI agents. It
//! implements the MCP protocol over stdin/stdout using JSON-RPC 2.0.
//!
//! ## 6 Tools
//!
//! `get_user_info`, `get_posts`, `get_post_detail`, `create_post`,
//! `update_post`, `delete_post`
//!
//! Every tool runs through one execution harness that logs the call, prepares
//! the client parameters, invokes the API and renders the result as text.
//!
//! ## Usage
//!
//! The server is typically run as an executable and configured in AI tools like Claude Desktop:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "esa": {
//!       "command": "/path/to/esa-mcp",
//!       "env": {
//!         "ESA_TOKEN": "your-access-token",
//!         "ESA_TEAM_NAME": "your-team"
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! For testing or embedding, you can use the library API:
//!
//! ```no_run
//! use esa_mcp::{EsaClient, EsaConfig, McpServer, ToolRegistry};
//!
//! # async fn run() -> esa_mcp::Result<()> {
//! let config = EsaConfig::new("token", "my-team")?;
//! let client = EsaClient::new(config)?;
//! let server = McpServer::new(client, ToolRegistry::new()?);
//!
//! // Run the server (reads from stdin, writes to stdout)
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
mod config;
mod error;
mod server;
pub mod tools;

pub use client::EsaClient;
pub use config::{EsaConfig, DEFAULT_API_URL, TEAM_ENV_VAR, TOKEN_ENV_VAR};
pub use error::{ApiError, ApiResult, McpError, Result};
pub use server::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer, PROTOCOL_VERSION};
pub use tools::args::{FieldError, ValidationError};
pub use tools::executor::{ToolError, ToolExecutor, ToolLog, ToolLogic, TracingLog};
pub use tools::{ToolDef, ToolEntry, ToolRegistry};
