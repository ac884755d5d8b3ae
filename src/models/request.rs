use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// JSON body accepted by every prompt-driven route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct PromptRequest {
    #[schemars(description = "Natural language prompt forwarded to the model")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Knowledge base session to continue (knowledge-base-query only)")]
    pub session_id: Option<String>,
}
