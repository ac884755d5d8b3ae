use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::{Action, ConverseProfile, converse_prompt};
use crate::clients::{InferenceParams, ModelRuntime};
use crate::models::{ActionResult, AppError, ProxyRequest};

/// Cohere Command R+.
pub const MODEL_ID: &str = "cohere.command-r-plus-v1:0";

/// Free-text interpretation.
pub struct InterpretText {
    runtime: Arc<dyn ModelRuntime>,
    profile: ConverseProfile,
}

impl InterpretText {
    #[must_use]
    pub fn new(runtime: Arc<dyn ModelRuntime>) -> Self {
        Self {
            runtime,
            profile: ConverseProfile {
                model_id: MODEL_ID,
                inference: InferenceParams {
                    max_tokens: None,
                    temperature: Some(0.3),
                    top_p: Some(0.75),
                },
                additional_fields: Some(json!({ "k": 0 })),
            },
        }
    }
}

#[async_trait]
impl Action for InterpretText {
    async fn invoke(&self, request: ProxyRequest) -> Result<ActionResult, AppError> {
        converse_prompt(self.runtime.as_ref(), &self.profile, &request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clients::MockModelRuntime;

    #[tokio::test]
    async fn test_interpret_text_configuration() {
        let mut runtime = MockModelRuntime::new();
        runtime
            .expect_converse()
            .withf(|req| {
                req.model_id == MODEL_ID
                    && req.inference.max_tokens.is_none()
                    && req.inference.temperature == Some(0.3)
                    && req.inference.top_p == Some(0.75)
                    && req.additional_fields == Some(json!({"k": 0}))
            })
            .times(1)
            .returning(|_| Ok("It is a haiku about autumn.".to_string()));

        let action = InterpretText::new(Arc::new(runtime));
        let result = action
            .invoke(ProxyRequest {
                http_method: "POST".to_string(),
                resource: "/interpret-text".to_string(),
                body: Some(r#"{"prompt":"What is this poem about?"}"#.into()),
            })
            .await
            .unwrap();

        assert_eq!(result.body, json!("It is a haiku about autumn."));
    }
}
