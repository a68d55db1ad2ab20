/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Routes tool calls to the fitness tracker tools
/// 3. Sends JSON-RPC responses to stdout

use chrono::{NaiveDate, Utc};
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{FitnessTrackerServer, TrackerError};

/// Why a tool call did not produce a result
#[derive(Error, Debug)]
enum CallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    Arguments(serde_json::Error),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Failed to encode response: {0}")]
    Encode(serde_json::Error),
}

/// MCP server that handles communication with the client
pub struct McpServer {
    /// The underlying fitness tracker
    fitness_tracker: FitnessTrackerServer,
    /// Whether the client has finished initialization
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(fitness_tracker: FitnessTrackerServer) -> Self {
        Self {
            fitness_tracker,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The wrapped tracker server (useful for testing)
    pub fn fitness_tracker(&self) -> &FitnessTrackerServer {
        &self.fitness_tracker
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), TrackerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Handle a JSON-RPC request
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
                None,
            ));
        }

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(request)),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                // Notifications carry no id and get no reply
                (!request.id.is_null()).then(|| JsonRpcResponse::success(request.id, Value::Null))
            }
            "tools/list" => Some(self.handle_tools_list(request)),
            "tools/call" => Some(self.handle_tools_call(request, Utc::now().date_naive())),
            _ => Some(JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            )),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Fitness Tracker MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        encode_result(request.id, &result)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = tool_definitions();
        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    /// Handle tools/call request for the given calendar day
    fn handle_tools_call(&mut self, request: JsonRpcRequest, today: NaiveDate) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let name = tool_params.name;
        let args = tool_params.arguments.unwrap_or_else(|| json!({}));

        match self.call_tool(&name, args, today) {
            Ok(result) => encode_result(request.id, &result),
            Err(CallError::UnknownTool(tool)) => {
                warn!("Client called unknown tool '{}'", tool);
                encode_result(request.id, &ToolCallResult::error(format!("Unknown tool: {}", tool)))
            }
            Err(CallError::Arguments(e)) => JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_PARAMS,
                format!("Invalid arguments for '{}': {}", name, e),
                None,
            ),
            Err(CallError::Tool(e)) => {
                let code = tool_error_code(&e);
                if code == error_codes::VALIDATION_ERROR {
                    debug!("Tool '{}' rejected input: {}", name, e);
                } else {
                    error!("Tool '{}' failed: {}", name, e);
                }
                JsonRpcResponse::error(request.id, code, e.to_string(), Some(json!({ "tool": name })))
            }
            Err(e @ CallError::Encode(_)) => {
                error!("{}", e);
                JsonRpcResponse::error(request.id, error_codes::INTERNAL_ERROR, e.to_string(), None)
            }
        }
    }

    /// Route a tool call to its implementation
    fn call_tool(&mut self, name: &str, args: Value, today: NaiveDate) -> Result<ToolCallResult, CallError> {
        let tracker = self.fitness_tracker.tracker_mut();
        match name {
            "weight_add" => output(tools::add_measurement(tracker, from_args(args)?, today)?),
            "weight_delete" => output(tools::delete_measurement(tracker, from_args(args)?)?),
            "weight_set_start" => output(tools::set_starting_weight(tracker, from_args(args)?)?),
            "weight_summary" => output(tools::weight_summary(tracker, from_args(args)?)?),
            "goal_set" => output(tools::set_goal(tracker, from_args(args)?, today)?),
            "wellness_log" => output(tools::log_wellness(tracker, from_args(args)?, today)?),
            "wellness_list" => output(tools::list_wellness(tracker, from_args(args)?)?),
            "streak_check_in" => output(tools::check_in(tracker, today)?),
            "streak_status" => output(tools::streak_status(tracker, today)?),
            "analytics_report" => output(tools::analytics_report(tracker, today)?),
            "view_set" => output(tools::set_view(tracker, from_args(args)?)?),
            "theme_toggle" => output(tools::toggle_theme(tracker)?),
            _ => Err(CallError::UnknownTool(name.to_string())),
        }
    }
}

/// Deserialize tool arguments into a params struct
fn from_args<T: DeserializeOwned>(args: Value) -> Result<T, CallError> {
    serde_json::from_value(args).map_err(CallError::Arguments)
}

/// Wrap a tool response: its `message` becomes the text content
fn output<R: Serialize>(response: R) -> Result<ToolCallResult, CallError> {
    let value = serde_json::to_value(response).map_err(CallError::Encode)?;
    let text = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(ToolCallResult::success(text, Some(value)))
}

fn encode_result<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => {
            error!("Failed to encode result: {}", e);
            JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string(), None)
        }
    }
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| no_arguments())
}

fn no_arguments() -> Value {
    json!({ "type": "object", "properties": {} })
}

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Every tool this server exposes
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "weight_add",
            "Log a weight measurement for today or an earlier date",
            input_schema::<tools::AddMeasurementParams>(),
        ),
        tool(
            "weight_delete",
            "Delete every weight measurement recorded on a date",
            input_schema::<tools::DeleteMeasurementParams>(),
        ),
        tool(
            "weight_set_start",
            "Set or clear the starting weight used for progress",
            input_schema::<tools::SetStartingWeightParams>(),
        ),
        tool(
            "weight_summary",
            "Show current weight, total change and goal progress",
            input_schema::<tools::WeightSummaryParams>(),
        ),
        tool(
            "goal_set",
            "Set a target weight and the date to reach it by",
            input_schema::<tools::SetGoalParams>(),
        ),
        tool(
            "wellness_log",
            "Record today's mood, energy, stress and motivation",
            input_schema::<tools::LogWellnessParams>(),
        ),
        tool(
            "wellness_list",
            "List recent wellness check-ins with averages",
            input_schema::<tools::ListWellnessParams>(),
        ),
        tool("streak_check_in", "Check in for today to keep the streak going", no_arguments()),
        tool("streak_status", "Show the current and best streak with milestones", no_arguments()),
        tool(
            "analytics_report",
            "Weekly, monthly and average weight change with a weekly breakdown",
            no_arguments(),
        ),
        tool(
            "view_set",
            "Switch the active view (weight, wellness, analytics, streak)",
            input_schema::<tools::SetViewParams>(),
        ),
        tool("theme_toggle", "Switch between light and dark mode", no_arguments()),
    ]
}
