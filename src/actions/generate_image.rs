use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::tracing::{error, info};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use super::Action;
use crate::clients::{InvokeModelRequest, ModelRuntime, ObjectStore, PresignRequest, PutObjectRequest};
use crate::config::Settings;
use crate::models::{ActionResult, AppError, ProxyRequest};
use crate::utils::new_object_key;

/// Titan Image Generator G1.
pub const MODEL_ID: &str = "amazon.titan-image-generator-v1";

/// Lifetime of the download link returned to the caller.
pub const URL_EXPIRY: Duration = Duration::from_secs(3600);

const SERVICE: &str = "bedrock-runtime";

/// Generates an image, stores it in the assets bucket and returns a
/// pre-signed download URL.
pub struct GenerateImage {
    runtime: Arc<dyn ModelRuntime>,
    store: Arc<dyn ObjectStore>,
    settings: Arc<dyn Settings>,
}

impl GenerateImage {
    #[must_use]
    pub fn new(
        runtime: Arc<dyn ModelRuntime>,
        store: Arc<dyn ObjectStore>,
        settings: Arc<dyn Settings>,
    ) -> Self {
        Self {
            runtime,
            store,
            settings,
        }
    }
}

/// Native Titan request for a single 1024x1024 image.
#[must_use]
pub fn image_request(prompt: &str) -> Value {
    json!({
        "textToImageParams": {
            "text": prompt
        },
        "taskType": "TEXT_IMAGE",
        "imageGenerationConfig": {
            "cfgScale": 8,
            "seed": 0,
            "width": 1024,
            "height": 1024,
            "numberOfImages": 1
        }
    })
}

/// Decodes the first base64 image of a Titan response.
///
/// # Errors
///
/// Returns `AppError::Upstream` if the response holds no image or the image
/// is not valid base64.
pub fn decode_first_image(response: &Value) -> Result<Vec<u8>, AppError> {
    let encoded = response
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::upstream(SERVICE, "model response contains no image"))?;

    STANDARD
        .decode(encoded)
        .map_err(|e| AppError::upstream(SERVICE, format!("Failed to decode image: {e}")))
}

#[async_trait]
impl Action for GenerateImage {
    async fn invoke(&self, request: ProxyRequest) -> Result<ActionResult, AppError> {
        let prompt = request.prompt_request()?.prompt;
        info!("Prompt: {}", prompt);

        let body = image_request(&prompt);
        info!("Requesting: {}", body);

        let response = self
            .runtime
            .invoke_model(InvokeModelRequest {
                model_id: MODEL_ID.to_string(),
                body,
            })
            .await
            .map_err(|e| {
                error!(model_id = %MODEL_ID, error = %e, "Can't invoke model");
                e
            })?;

        let image = decode_first_image(&response)?;

        info!("Image generated, writing to S3...");
        let bucket = self.settings.assets_bucket()?;
        let key = new_object_key("png");

        self.store
            .put_object(PutObjectRequest {
                bucket: bucket.clone(),
                key: key.clone(),
                body: image,
                content_type: Some("image/png".to_string()),
            })
            .await
            .map_err(|e| {
                error!(bucket = %bucket, key = %key, error = %e, "Failed to store image");
                e
            })?;

        let url = self
            .store
            .presigned_get_url(PresignRequest {
                bucket,
                key,
                expires_in: URL_EXPIRY,
            })
            .await?;

        info!("Done!");
        Ok(ActionResult::new(url))
    }
}
