use async_trait::async_trait;
use lambda_runtime::tracing::{error, info};
use std::sync::Arc;

use super::Action;
use crate::clients::{KnowledgeBase, RetrieveAndGenerateRequest};
use crate::config::Settings;
use crate::models::{ActionResult, AppError, ProxyRequest};

/// Retrieval-augmented generation over the configured knowledge base.
///
/// A `session_id` in the request body continues an earlier conversation.
pub struct KnowledgeBaseQuery {
    knowledge_base: Arc<dyn KnowledgeBase>,
    settings: Arc<dyn Settings>,
}

impl KnowledgeBaseQuery {
    #[must_use]
    pub fn new(knowledge_base: Arc<dyn KnowledgeBase>, settings: Arc<dyn Settings>) -> Self {
        Self {
            knowledge_base,
            settings,
        }
    }
}

#[async_trait]
impl Action for KnowledgeBaseQuery {
    async fn invoke(&self, request: ProxyRequest) -> Result<ActionResult, AppError> {
        let body = request.prompt_request()?;
        info!("Prompt: {}", body.prompt);

        let query = RetrieveAndGenerateRequest {
            prompt: body.prompt,
            knowledge_base_id: self.settings.knowledge_base_id()?,
            model_arn: self.settings.knowledge_base_model_arn()?,
            session_id: body.session_id,
        };

        let response = self
            .knowledge_base
            .retrieve_and_generate(query)
            .await
            .map_err(|e| {
                error!(error = %e, "Knowledge base query failed");
                e
            })?;

        Ok(ActionResult::new(response))
    }
}
