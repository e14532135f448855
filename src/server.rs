//! MCP server over stdio.
//!
//! Reads newline-delimited JSON-RPC 2.0 messages and writes one response line
//! per request. Notifications get no response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::client::EsaClient;
use crate::error::{McpError, Result};
use crate::tools::executor::TracingLog;
use crate::tools::ToolRegistry;

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;

/// An incoming JSON-RPC message.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, must be "2.0".
    pub jsonrpc: String,
    /// Request id; absent for notifications.
    #[serde(default)]
    pub id: Option<JsonValue>,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default)]
    pub params: Option<JsonValue>,
}

/// An outgoing JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    /// Always "2.0".
    pub jsonrpc: String,
    /// Id of the request being answered.
    pub id: JsonValue,
    /// Result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    /// Error on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i32,
    /// Error message.
    pub message: String,
}

impl JsonRpcResponse {
    fn success(id: JsonValue, result: JsonValue) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: JsonValue, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// MCP server exposing the esa.io tools.
pub struct McpServer {
    client: EsaClient,
    registry: ToolRegistry,
    log: TracingLog,
}

impl McpServer {
    /// Create a server around an esa.io client and a populated registry.
    pub fn new(client: EsaClient, registry: ToolRegistry) -> Self {
        Self {
            client,
            registry,
            log: TracingLog,
        }
    }

    /// The registered tools.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve an arbitrary line-oriented transport until the reader is exhausted.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(tools = self.registry.tools().len(), "esa-mcp server ready");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line).await,
                Err(e) => {
                    warn!(error = %e, "message is not valid UTF-8");
                    Some(JsonRpcResponse::failure(
                        JsonValue::Null,
                        PARSE_ERROR,
                        format!("Parse error: {e}"),
                    ))
                }
            };

            if let Some(response) = response {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw line. Returns `None` for blank lines and notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                Some(JsonRpcResponse::failure(
                    JsonValue::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        }
    }

    /// Handle a parsed request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification");
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                "Invalid Request: jsonrpc must be \"2.0\"",
            ));
        }

        debug!(method = %request.method, "request");
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => {
                JsonRpcResponse::success(id, serde_json::json!({ "tools": self.registry.tools() }))
            }
            "tools/call" => match self.call_tool(request.params).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::failure(id, e.code(), e.to_string()),
            },
            other => JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };
        Some(response)
    }

    fn initialize_result(&self) -> JsonValue {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "esa-mcp",
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    /// Run `tools/call`. Tool failures become an `isError` result; only
    /// protocol problems (bad params, unknown tool) are JSON-RPC errors.
    async fn call_tool(&self, params: Option<JsonValue>) -> Result<JsonValue> {
        let params = params.unwrap_or_else(|| JsonValue::Object(Map::new()));
        let name = params
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| McpError::InvalidParams("missing tool name".to_string()))?;
        let args = match params.get("arguments") {
            None | Some(JsonValue::Null) => Map::new(),
            Some(JsonValue::Object(map)) => map.clone(),
            Some(_) => {
                return Err(McpError::InvalidParams(
                    "arguments must be an object".to_string(),
                ))
            }
        };

        match self.registry.call(&self.client, name, args, &self.log).await {
            Ok(text) => Ok(tool_result(text, false)),
            Err(e @ McpError::UnknownTool(_)) => Err(e),
            Err(e) => Ok(tool_result(e.to_string(), true)),
        }
    }
}

fn tool_result(text: String, is_error: bool) -> JsonValue {
    serde_json::json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::EsaConfig;

    fn server() -> McpServer {
        // Nothing in these tests reaches the network.
        let config = EsaConfig::new("token", "team")
            .unwrap()
            .with_api_url("http://127.0.0.1:9");
        McpServer::new(EsaClient::new(config).unwrap(), ToolRegistry::new().unwrap())
    }

    async fn roundtrip(server: &McpServer, message: JsonValue) -> JsonValue {
        let response = server.handle_line(&message.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = server();
        let response = roundtrip(
            &server,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        )
        .await;

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], "esa-mcp");
        assert!(response["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = server();
        let response = roundtrip(
            &server,
            json!({ "jsonrpc": "2.0", "id": "a", "method": "tools/list" }),
        )
        .await;

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = server();
        let line = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string();
        assert!(server.handle_line(&line).await.is_none());
        assert!(server.handle_line("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let server = server();

        let response = serde_json::to_value(server.handle_line("{not json").await.unwrap()).unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], JsonValue::Null);

        let response = roundtrip(&server, json!({ "jsonrpc": "2.0", "id": 2, "method": "resources/list" })).await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);

        let response = roundtrip(&server, json!({ "jsonrpc": "1.0", "id": 3, "method": "ping" })).await;
        assert_eq!(response["error"]["code"], INVALID_REQUEST);

        let response = roundtrip(
            &server,
            json!({ "jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": { "name": "nope" } }),
        )
        .await;
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_validation_failure_is_tool_error() {
        let server = server();
        let response = roundtrip(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": { "name": "get_posts", "arguments": { "per_page": 101 } }
            }),
        )
        .await;

        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("per_page"));
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_request() {
        let server = server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let mut output = Vec::new();

        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: JsonValue = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(first["result"], json!({}));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_server() {
        let server = server();
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#);
        input.push(b'\n');
        let mut output = Vec::new();

        server.serve(input.as_slice(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<JsonValue> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(lines[0]["id"], JsonValue::Null);
        assert_eq!(lines[1]["id"], 7);
        assert_eq!(lines[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_last_line_without_newline_is_served() {
        let server = server();
        let input = r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#;
        let mut output = Vec::new();

        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let response: JsonValue = serde_json::from_slice(&output).unwrap();
        assert_eq!(response["id"], 1);
    }
}
