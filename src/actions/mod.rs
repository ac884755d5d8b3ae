//! Action handlers bound to API routes.
//!
//! Every action parses what it needs from the proxy request, makes exactly one
//! upstream call (image generation also stores and presigns the result) and
//! returns `{"body": <value>}`. Upstream failures are logged and returned
//! unchanged.

pub mod generate_code;
pub mod generate_image;
pub mod ingestion;
pub mod interpret_text;
pub mod knowledge_base_query;
pub mod summarize_text;
pub mod version;

use async_trait::async_trait;
use lambda_runtime::tracing::{error, info};
use serde_json::Value;

use crate::clients::{ConverseRequest, InferenceParams, ModelRuntime};
use crate::models::{ActionResult, AppError, ProxyRequest};

pub use generate_code::GenerateCode;
pub use generate_image::GenerateImage;
pub use ingestion::TriggerIngestion;
pub use interpret_text::InterpretText;
pub use knowledge_base_query::KnowledgeBaseQuery;
pub use summarize_text::SummarizeText;
pub use version::Version;

/// A handler the router can dispatch a proxy request to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Action: Send + Sync {
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a missing request field,
    /// `AppError::Configuration` for missing settings and `AppError::Upstream`
    /// when the AWS call fails.
    async fn invoke(&self, request: ProxyRequest) -> Result<ActionResult, AppError>;
}

/// Fixed model and sampling configuration of a converse-based action.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverseProfile {
    pub model_id: &'static str,
    pub inference: InferenceParams,
    pub additional_fields: Option<Value>,
}

/// Runs the shared converse flow: read `prompt`, send one user turn, return
/// the reply text.
async fn converse_prompt(
    runtime: &dyn ModelRuntime,
    profile: &ConverseProfile,
    request: &ProxyRequest,
) -> Result<ActionResult, AppError> {
    let prompt = request.prompt_request()?.prompt;
    info!("Prompt: {}", prompt);

    let text = runtime
        .converse(ConverseRequest {
            model_id: profile.model_id.to_string(),
            prompt,
            inference: profile.inference,
            additional_fields: profile.additional_fields.clone(),
        })
        .await
        .map_err(|e| {
            error!(model_id = %profile.model_id, error = %e, "Can't invoke model");
            e
        })?;

    Ok(ActionResult::new(text))
}
