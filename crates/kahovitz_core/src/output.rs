//! Output types from LLM responses.

use serde::{Deserialize, Serialize};

/// Outputs a chat-completion provider can return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output.
    Json(serde_json::Value),
}
