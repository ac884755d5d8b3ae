use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::{Action, ConverseProfile, converse_prompt};
use crate::clients::{InferenceParams, ModelRuntime};
use crate::models::{ActionResult, AppError, ProxyRequest};

/// Claude 3 Sonnet.
pub const MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Summarizes the text given as prompt.
pub struct SummarizeText {
    runtime: Arc<dyn ModelRuntime>,
    profile: ConverseProfile,
}

impl SummarizeText {
    #[must_use]
    pub fn new(runtime: Arc<dyn ModelRuntime>) -> Self {
        Self {
            runtime,
            profile: ConverseProfile {
                model_id: MODEL_ID,
                inference: InferenceParams {
                    max_tokens: Some(4096),
                    temperature: Some(0.0),
                    top_p: None,
                },
                additional_fields: Some(json!({ "top_k": 250 })),
            },
        }
    }
}

#[async_trait]
impl Action for SummarizeText {
    async fn invoke(&self, request: ProxyRequest) -> Result<ActionResult, AppError> {
        converse_prompt(self.runtime.as_ref(), &self.profile, &request).await
    }
}
