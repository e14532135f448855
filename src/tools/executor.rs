//! Tool execution harness.
//!
//! A [`ToolLogic`] describes one tool as data: the operation to call, a pure
//! transform from validated arguments to operation parameters, and an optional
//! success formatter. [`ToolExecutor`] wraps a descriptor and runs every tool
//! through the same lifecycle:
//!
//! 1. log the call and its arguments (info)
//! 2. prepare operation parameters (debug, or error and stop)
//! 3. call the operation (error and stop on transport failure, otherwise debug)
//! 4. format the value (info) or report the API error (error)
//!
//! Each failure is logged exactly once, at the stage that detected it.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::error::{ApiError, ApiResult, McpError, Result};
use crate::tools::args::{parse_args, ToolArgs};

/// Boxed future returned by an operation function.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

/// An operation function: one request against backend `C` with params `P`.
pub type ApiFn<C, P, T> = for<'a> fn(&'a C, P) -> ApiFuture<'a, T>;

/// A pure transform from validated arguments to operation parameters.
pub type ClientParamsFn<A, P> = fn(A) -> std::result::Result<P, ParamError>;

/// Parameter preparation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParamError(pub String);

/// Per-tool descriptor: what to call and how to reshape its input and output.
pub struct ToolLogic<C, A, P, T> {
    /// The operation. The only step with side effects.
    pub api_fn: ApiFn<C, P, T>,
    /// Validated arguments to operation parameters. Must not perform I/O.
    pub client_params: ClientParamsFn<A, P>,
    /// Success formatter. The value is JSON-serialized when absent.
    pub format_success: Option<fn(&T) -> String>,
}

/// Why a tool call failed after its arguments were validated.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The descriptor could not build operation parameters.
    #[error("Parameter preparation failed for {tool}: {source}")]
    ParamPreparation {
        /// Tool name.
        tool: String,
        /// Underlying failure.
        source: ParamError,
    },

    /// The operation returned an error (precondition or HTTP status).
    #[error("API call failed for {tool}: {source}")]
    Api {
        /// Tool name.
        tool: String,
        /// Underlying failure.
        source: ApiError,
    },

    /// The request never completed. The transport's message is kept as is.
    #[error(transparent)]
    Transport(ApiError),

    /// The successful value could not be serialized.
    #[error("Failed to serialize result for {tool}: {source}")]
    Output {
        /// Tool name.
        tool: String,
        /// Underlying failure.
        source: serde_json::Error,
    },
}

/// Log sink handed to each tool call.
pub trait ToolLog: Send + Sync {
    /// Fine-grained progress.
    fn debug(&self, message: &str);
    /// Call start and success.
    fn info(&self, message: &str);
    /// Failures.
    fn error(&self, message: &str);
}

/// [`ToolLog`] that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ToolLog for TracingLog {
    fn debug(&self, message: &str) {
        debug!(target: "esa_mcp::tool", "{message}");
    }

    fn info(&self, message: &str) {
        info!(target: "esa_mcp::tool", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "esa_mcp::tool", "{message}");
    }
}

/// A descriptor bound to its tool name.
pub struct ToolExecutor<C, A, P, T> {
    tool_name: String,
    logic: ToolLogic<C, A, P, T>,
}

impl<C, A, P, T> ToolExecutor<C, A, P, T>
where
    C: Sync,
    A: Serialize,
    T: Serialize,
{
    /// Bind `logic` to `tool_name`.
    pub fn new(tool_name: impl Into<String>, logic: ToolLogic<C, A, P, T>) -> Self {
        Self {
            tool_name: tool_name.into(),
            logic,
        }
    }

    /// Name used in log lines and error messages.
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Run the tool on already validated arguments.
    pub async fn execute(
        &self,
        client: &C,
        args: A,
        log: &dyn ToolLog,
    ) -> std::result::Result<String, ToolError> {
        let tool = self.tool_name.as_str();

        let args_for_log = serde_json::to_string(&args)
            .unwrap_or_else(|_| "[unloggable arguments]".to_string());
        log.info(&format!("Executing tool: {tool} with args: {args_for_log}"));

        let params = match (self.logic.client_params)(args) {
            Ok(params) => {
                log.debug(&format!("[{tool}] Prepared client params."));
                params
            }
            Err(e) => {
                log.error(&format!("Error preparing client params for {tool}: {e}"));
                return Err(ToolError::ParamPreparation {
                    tool: tool.to_string(),
                    source: e,
                });
            }
        };

        let result = match (self.logic.api_fn)(client, params).await {
            Err(e) if e.is_transport() => {
                log.error(&format!("Unexpected error during {tool} execution: {e}"));
                return Err(ToolError::Transport(e));
            }
            result => result,
        };

        log.debug(&format!(
            "[{tool}] API call completed. Result ok: {}",
            result.is_ok()
        ));

        match result {
            Ok(value) => {
                let output = match self.format(&value) {
                    Ok(output) => output,
                    Err(e) => {
                        log.error(&format!("Unexpected error during {tool} execution: {e}"));
                        return Err(ToolError::Output {
                            tool: tool.to_string(),
                            source: e,
                        });
                    }
                };
                log.info(&format!(
                    "[{tool}] Execution successful. Output length: {}",
                    output.len()
                ));
                Ok(output)
            }
            Err(e) => {
                log.error(&format!("[{tool}] API Error: {e}"));
                Err(ToolError::Api {
                    tool: tool.to_string(),
                    source: e,
                })
            }
        }
    }

    fn format(&self, value: &T) -> serde_json::Result<String> {
        match self.logic.format_success {
            Some(format) => Ok(format(value)),
            None => serde_json::to_string(value),
        }
    }
}

/// A registered, type-erased tool: validates raw arguments, then executes.
#[async_trait]
pub trait Tool<C: Sync>: Send + Sync {
    /// Validate `args` and run the tool.
    async fn call(
        &self,
        client: &C,
        args: Map<String, JsonValue>,
        log: &dyn ToolLog,
    ) -> Result<String>;
}

#[async_trait]
impl<C, A, P, T> Tool<C> for ToolExecutor<C, A, P, T>
where
    C: Sync + 'static,
    A: ToolArgs,
    P: Send + 'static,
    T: Serialize + Send + 'static,
{
    async fn call(
        &self,
        client: &C,
        args: Map<String, JsonValue>,
        log: &dyn ToolLog,
    ) -> Result<String> {
        let args = parse_args::<A>(args).map_err(|source| McpError::InvalidArgs {
            tool: self.tool_name.clone(),
            source,
        })?;
        Ok(self.execute(client, args, log).await?)
    }
}

/// A descriptor that can be bound to a name and erased into a [`Tool`].
pub trait BindTool<C: Sync>: Send + Sync {
    /// JSON Schema of the descriptor's arguments.
    fn input_schema(&self) -> JsonValue;

    /// Wrap the descriptor in the harness under `tool_name`.
    fn bind(self: Box<Self>, tool_name: &str) -> Box<dyn Tool<C>>;
}

impl<C, A, P, T> BindTool<C> for ToolLogic<C, A, P, T>
where
    C: Sync + 'static,
    A: ToolArgs,
    P: Send + 'static,
    T: Serialize + Send + 'static,
{
    fn input_schema(&self) -> JsonValue {
        A::input_schema()
    }

    fn bind(self: Box<Self>, tool_name: &str) -> Box<dyn Tool<C>> {
        Box::new(ToolExecutor::new(tool_name, *self))
    }
}
