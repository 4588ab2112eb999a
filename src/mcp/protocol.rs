//! MCP protocol response helpers.

use rmcp::model::{CallToolResult, Content, ErrorData};
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON format (default).
    #[default]
    Json,
    /// TOON (Token-Oriented Object Notation), more compact for LLM context.
    Toon,
}

/// Tool response that serializes as the raw inner value.
///
/// ```ignore
/// Response(check, None).into()                      // JSON output
/// Response(check, Some(OutputFormat::Toon)).into()  // TOON output
/// ```
pub struct Response<T>(pub T, pub Option<OutputFormat>);

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T: Serialize> From<Response<T>> for Result<CallToolResult, ErrorData> {
    fn from(response: Response<T>) -> Self {
        let content = match response.1.unwrap_or_default() {
            OutputFormat::Json => serde_json::to_value(&response.0)
                .map_err(|e| ErrorData::internal_error(format!("JSON serialization: {}", e), None))
                .and_then(Content::json)?,
            OutputFormat::Toon => {
                let toon = serde_toon::to_string(&response.0).map_err(|e| {
                    ErrorData::internal_error(format!("TOON serialization: {}", e), None)
                })?;
                Content::text(toon)
            }
        };
        Ok(CallToolResult::success(vec![content]))
    }
}
