//! Capability interfaces over the AWS services the actions call.
//!
//! Actions only see these traits, so tests inject mocks instead of making
//! network calls. Production implementations wrap the AWS SDK clients and are
//! built once per cold start.

pub mod bedrock;
pub mod knowledge_base;
pub mod s3;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{EnvSettings, Settings};
use crate::models::AppError;

pub use bedrock::BedrockRuntime;
pub use knowledge_base::BedrockKnowledgeBase;
pub use s3::S3ObjectStore;

/// Region hosting the code generation model.
pub const CODE_MODEL_REGION: &str = "us-west-2";

/// Sampling parameters of a converse call. `None` leaves the model default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InferenceParams {
    pub max_tokens: Option<i32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

/// A single-turn converse request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverseRequest {
    pub model_id: String,
    pub prompt: String,
    pub inference: InferenceParams,
    /// Model-specific fields such as `top_k`
    pub additional_fields: Option<Value>,
}

/// A native-format model invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeModelRequest {
    pub model_id: String,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveAndGenerateRequest {
    pub prompt: String,
    pub knowledge_base_id: String,
    pub model_arn: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionJobRequest {
    pub knowledge_base_id: String,
    pub data_source_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignRequest {
    pub bucket: String,
    pub key: String,
    pub expires_in: Duration,
}

/// Model invocation on the Bedrock runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    /// Sends a single user turn and returns the text of the reply.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Upstream` if the call fails or the reply has no text.
    async fn converse(&self, request: ConverseRequest) -> Result<String, AppError>;

    /// Invokes a model with a JSON body and returns its JSON response.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Upstream` if the call fails or the response is not JSON.
    async fn invoke_model(&self, request: InvokeModelRequest) -> Result<Value, AppError>;
}

/// Knowledge base querying and ingestion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// # Errors
    ///
    /// Returns `AppError::Upstream` if the query fails.
    async fn retrieve_and_generate(
        &self,
        request: RetrieveAndGenerateRequest,
    ) -> Result<Value, AppError>;

    /// # Errors
    ///
    /// Returns `AppError::Upstream` if the job cannot be started.
    async fn start_ingestion_job(&self, request: IngestionJobRequest) -> Result<Value, AppError>;
}

/// Object storage for generated assets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `AppError::Upstream` if the upload fails.
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), AppError>;

    /// Issues a time-limited download URL for an object.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Upstream` if the URL cannot be presigned.
    async fn presigned_get_url(&self, request: PresignRequest) -> Result<String, AppError>;
}

/// Clients and settings shared by every action for the lifetime of the process.
#[derive(Clone)]
pub struct Services {
    pub runtime: Arc<dyn ModelRuntime>,
    pub code_runtime: Arc<dyn ModelRuntime>,
    pub knowledge_base: Arc<dyn KnowledgeBase>,
    pub object_store: Arc<dyn ObjectStore>,
    pub settings: Arc<dyn Settings>,
}

impl Services {
    /// Builds the AWS clients from the Lambda environment.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let code_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(CODE_MODEL_REGION))
            .load()
            .await;

        Self {
            runtime: Arc::new(BedrockRuntime::new(aws_sdk_bedrockruntime::Client::new(
                &config,
            ))),
            code_runtime: Arc::new(BedrockRuntime::new(aws_sdk_bedrockruntime::Client::new(
                &code_config,
            ))),
            knowledge_base: Arc::new(BedrockKnowledgeBase::from_conf(&config)),
            object_store: Arc::new(S3ObjectStore::new(aws_sdk_s3::Client::new(&config))),
            settings: Arc::new(EnvSettings),
        }
    }
}
