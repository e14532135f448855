//! Error types for the esa MCP server.

use thiserror::Error;

use crate::tools::args::ValidationError;
use crate::tools::executor::ToolError;

/// Result type alias for server, registry and configuration operations.
pub type Result<T> = std::result::Result<T, McpError>;

/// Result type returned by every esa.io operation function.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Placeholder used when the body of a failed response cannot be read.
pub const UNREADABLE_BODY: &str = "(Failed to read error body)";

/// Failure of a single esa.io operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A post number was zero or negative. No request was sent.
    #[error("Invalid post number. Must be greater than 0.")]
    InvalidPostNumber,

    /// An update was requested without any changed field. No request was sent.
    #[error("No update fields provided.")]
    NoUpdateFields,

    /// esa.io answered with a status other than the one the operation expects.
    #[error("API Error {status}: {status_text}. Body: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status, empty if unknown.
        status_text: String,
        /// Response body, or a placeholder when it could not be read.
        body: String,
    },

    /// esa.io answered with the expected status but a body of the wrong shape.
    #[error("Failed to parse response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request itself failed (connection, TLS, reading the body).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether the request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// HTTP status code for [`ApiError::Status`] failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors surfaced by the MCP server, the tool registry and startup.
#[derive(Debug, Error)]
pub enum McpError {
    /// Missing or unusable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A registry entry lacks a name, description or object schema.
    #[error("Tool registration failed: Implementation for key '{key}' is incomplete (missing name, description, or schema).")]
    IncompleteTool {
        /// Key of the offending entry in the implementations list.
        key: String,
    },

    /// Registering an otherwise complete entry failed.
    #[error("Failed to register tool '{name}' (key: {key}): {reason}")]
    Registration {
        /// Tool name.
        name: String,
        /// Key of the entry in the implementations list.
        key: String,
        /// Why registration was refused.
        reason: String,
    },

    /// No tool with this name is registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments failed schema validation.
    #[error("{source}")]
    InvalidArgs {
        /// Tool the arguments were meant for.
        tool: String,
        /// Field-level validation failures.
        #[source]
        source: ValidationError,
    },

    /// The tool ran and failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Malformed JSON-RPC parameters.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// I/O error on the transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for errors reported as protocol errors.
    pub fn code(&self) -> i32 {
        match self {
            McpError::UnknownTool(_) | McpError::InvalidParams(_) => -32602,
            McpError::Json(_) => -32700,
            _ => -32603,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages() {
        assert_eq!(
            ApiError::InvalidPostNumber.to_string(),
            "Invalid post number. Must be greater than 0."
        );
        assert_eq!(ApiError::NoUpdateFields.to_string(), "No update fields provided.");
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
            body: r#"{"error":"not_found"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"API Error 404: Not Found. Body: {"error":"not_found"}"#
        );
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_decode_error_keeps_parser_message() {
        let source = serde_json::from_str::<serde_json::Value>("<html>oops</html>").unwrap_err();
        let detail = source.to_string();
        let err = ApiError::Decode(source);

        assert_eq!(err.to_string(), format!("Failed to parse response body: {detail}"));
        assert!(!err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_registration_messages() {
        let err = McpError::IncompleteTool {
            key: "posts/create".to_string(),
        };
        assert!(err.to_string().contains("'posts/create' is incomplete"));

        let err = McpError::Registration {
            name: "create_post".to_string(),
            key: "posts/create".to_string(),
            reason: "duplicate tool name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to register tool 'create_post' (key: posts/create): duplicate tool name"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(McpError::UnknownTool("x".into()).code(), -32602);
        assert_eq!(McpError::Config("x".into()).code(), -32603);
    }
}
