use async_trait::async_trait;
use std::sync::Arc;

use super::{Action, ConverseProfile, converse_prompt};
use crate::clients::{InferenceParams, ModelRuntime};
use crate::models::{ActionResult, AppError, ProxyRequest};

/// Llama 2 Chat 70B, served from `us-west-2`.
pub const MODEL_ID: &str = "meta.llama2-70b-chat-v1";

/// Generates code from a natural language prompt.
pub struct GenerateCode {
    runtime: Arc<dyn ModelRuntime>,
    profile: ConverseProfile,
}

impl GenerateCode {
    #[must_use]
    pub fn new(runtime: Arc<dyn ModelRuntime>) -> Self {
        Self {
            runtime,
            profile: ConverseProfile {
                model_id: MODEL_ID,
                inference: InferenceParams {
                    max_tokens: Some(512),
                    temperature: Some(0.5),
                    top_p: Some(0.9),
                },
                additional_fields: None,
            },
        }
    }
}

#[async_trait]
impl Action for GenerateCode {
    async fn invoke(&self, request: ProxyRequest) -> Result<ActionResult, AppError> {
        converse_prompt(self.runtime.as_ref(), &self.profile, &request).await
    }
}
