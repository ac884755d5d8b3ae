use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message,
};
use lambda_runtime::tracing::debug;
use serde_json::Value;

use super::{ConverseRequest, InvokeModelRequest, ModelRuntime};
use crate::models::AppError;
use crate::utils::{json_to_document, upstream_error};

const SERVICE: &str = "bedrock-runtime";

/// `ModelRuntime` backed by the Bedrock runtime API.
#[derive(Clone)]
pub struct BedrockRuntime {
    client: Client,
}

impl BedrockRuntime {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelRuntime for BedrockRuntime {
    async fn converse(&self, request: ConverseRequest) -> Result<String, AppError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(request.prompt))
            .build()
            .map_err(|e| AppError::upstream(SERVICE, e.to_string()))?;

        let inference = InferenceConfiguration::builder()
            .set_max_tokens(request.inference.max_tokens)
            .set_temperature(request.inference.temperature)
            .set_top_p(request.inference.top_p)
            .build();

        let response = self
            .client
            .converse()
            .model_id(&request.model_id)
            .messages(message)
            .inference_config(inference)
            .set_additional_model_request_fields(request.additional_fields.map(json_to_document))
            .send()
            .await
            .map_err(|e| upstream_error(SERVICE, e))?;

        debug!(model_id = %request.model_id, stop_reason = ?response.stop_reason(), "Converse completed");

        response
            .output()
            .and_then(|output| output.as_message().ok())
            .and_then(|message| message.content().first())
            .and_then(|block| block.as_text().ok())
            .cloned()
            .ok_or_else(|| AppError::upstream(SERVICE, "model response contains no text"))
    }

    async fn invoke_model(&self, request: InvokeModelRequest) -> Result<Value, AppError> {
        let body = serde_json::to_vec(&request.body)
            .map_err(|e| AppError::upstream(SERVICE, e.to_string()))?;

        let response = self
            .client
            .invoke_model()
            .model_id(&request.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| upstream_error(SERVICE, e))?;

        serde_json::from_slice(response.body().as_ref()).map_err(|e| {
            AppError::upstream(SERVICE, format!("Failed to parse model response: {e}"))
        })
    }
}
