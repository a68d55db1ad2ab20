/// Wire types for MCP over line-delimited JSON-RPC 2.0
///
/// Field names follow the MCP schema (camelCase) where the client reads
/// them; everything else mirrors JSON-RPC as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::StorageError;
use crate::tools::ToolError;

/// MCP protocol version we support
pub const MCP_VERSION: &str = "2024-11-05";

/// An incoming request or notification
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Null for notifications
    #[serde(default)]
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

/// A reply; exactly one of `result` and `error` is set
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// `params` of a tools/call request
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    /// Missing arguments are treated as an empty object
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// `result` of a tools/call request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    /// Structured copy of the tool response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    pub is_error: bool,
}

#[derive(Debug, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// One entry of the tools/list reply
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema generated from the tool's params struct
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

/// `result` of the initialize handshake
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    /// Tool input failed validation
    pub const VALIDATION_ERROR: i32 = -32003;
    /// The change was applied but could not be saved
    pub const STORAGE_ERROR: i32 = -32004;
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message, data }),
        }
    }
}

impl ToolCallResult {
    /// Text for the client to show, plus the structured response
    pub fn success(text: String, structured: Option<Value>) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            structured_content: structured,
            is_error: false,
        }
    }

    pub fn error(error_message: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", error_message),
            }],
            structured_content: None,
            is_error: true,
        }
    }
}

/// Map a tool failure to its JSON-RPC error code
pub fn tool_error_code(error: &ToolError) -> i32 {
    match error {
        ToolError::Validation(_) => error_codes::VALIDATION_ERROR,
        ToolError::Storage(StorageError::Serialization(_)) => error_codes::INTERNAL_ERROR,
        ToolError::Storage(_) => error_codes::STORAGE_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use serde_json::json;

    #[test]
    fn test_tool_error_codes() {
        let validation = ToolError::from(DomainError::validation("Please select a mood"));
        assert_eq!(tool_error_code(&validation), error_codes::VALIDATION_ERROR);

        let storage = ToolError::from(StorageError::Connection("gone".to_string()));
        assert_eq!(tool_error_code(&storage), error_codes::STORAGE_ERROR);
    }

    #[test]
    fn test_result_uses_mcp_field_names() {
        let value = serde_json::to_value(ToolCallResult::error("nope".to_string())).unwrap();
        assert_eq!(value["isError"], json!(true));
        assert_eq!(value["content"][0]["type"], json!("text"));
        assert_eq!(value["content"][0]["text"], json!("Error: nope"));
        assert!(value.get("structuredContent").is_none());
    }

    #[test]
    fn test_notification_has_null_id() {
        let request: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"initialized"}"#).unwrap();
        assert_eq!(request.id, Value::Null);
        assert!(request.params.is_none());
    }
}
