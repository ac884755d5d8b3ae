// Shared mocks and event builders for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use bedrock_lambda_api::actions::Action;
use bedrock_lambda_api::clients::{
    ConverseRequest, IngestionJobRequest, InvokeModelRequest, KnowledgeBase, ModelRuntime,
    ObjectStore, PresignRequest, PutObjectRequest, RetrieveAndGenerateRequest, Services,
};
use bedrock_lambda_api::config::{
    ASSETS_BUCKET, DATA_SOURCE_ID, KNOWLEDGE_BASE_ID, KNOWLEDGE_BASE_MODEL_ARN, StaticSettings,
};
use bedrock_lambda_api::models::{ActionResult, AppError, ProxyRequest};
use lambda_runtime::{Context, LambdaEvent};
use mockall::mock;
use serde_json::{Value, json};
use std::sync::Arc;

mock! {
    pub Handler {}

    #[async_trait]
    impl Action for Handler {
        async fn invoke(&self, request: ProxyRequest) -> Result<ActionResult, AppError>;
    }
}

mock! {
    pub Runtime {}

    #[async_trait]
    impl ModelRuntime for Runtime {
        async fn converse(&self, request: ConverseRequest) -> Result<String, AppError>;
        async fn invoke_model(&self, request: InvokeModelRequest) -> Result<Value, AppError>;
    }
}

mock! {
    pub Kb {}

    #[async_trait]
    impl KnowledgeBase for Kb {
        async fn retrieve_and_generate(
            &self,
            request: RetrieveAndGenerateRequest,
        ) -> Result<Value, AppError>;
        async fn start_ingestion_job(&self, request: IngestionJobRequest) -> Result<Value, AppError>;
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl ObjectStore for Store {
        async fn put_object(&self, request: PutObjectRequest) -> Result<(), AppError>;
        async fn presigned_get_url(&self, request: PresignRequest) -> Result<String, AppError>;
    }
}

/// Services where every client refuses to be called unless the test says so.
pub struct TestServices {
    pub runtime: MockRuntime,
    pub code_runtime: MockRuntime,
    pub knowledge_base: MockKb,
    pub object_store: MockStore,
}

impl TestServices {
    pub fn new() -> Self {
        Self {
            runtime: MockRuntime::new(),
            code_runtime: MockRuntime::new(),
            knowledge_base: MockKb::new(),
            object_store: MockStore::new(),
        }
    }

    pub fn build(self) -> Services {
        Services {
            runtime: Arc::new(self.runtime),
            code_runtime: Arc::new(self.code_runtime),
            knowledge_base: Arc::new(self.knowledge_base),
            object_store: Arc::new(self.object_store),
            settings: Arc::new(test_settings()),
        }
    }
}

pub fn test_settings() -> StaticSettings {
    StaticSettings::new()
        .with(ASSETS_BUCKET, "test-assets")
        .with(KNOWLEDGE_BASE_ID, "KBTEST0001")
        .with(
            KNOWLEDGE_BASE_MODEL_ARN,
            "arn:aws:bedrock:us-east-1::foundation-model/anthropic.claude-3-sonnet-20240229-v1:0",
        )
        .with(DATA_SOURCE_ID, "DSTEST0001")
}

/// An API Gateway proxy event with a JSON body holding `prompt`.
pub fn proxy_event(method: &str, resource: &str, prompt: &str) -> Value {
    json!({
        "httpMethod": method,
        "resource": resource,
        "body": json!({ "prompt": prompt }).to_string(),
    })
}

pub fn lambda_event(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent {
        payload,
        context: Context::default(),
    }
}

/// Mock action that must never run.
pub fn unused_action() -> Arc<MockHandler> {
    let mut action = MockHandler::new();
    action.expect_invoke().times(0);
    Arc::new(action)
}

/// Mock action that runs exactly once and answers with `body`.
pub fn action_returning(body: &'static str) -> Arc<MockHandler> {
    let mut action = MockHandler::new();
    action
        .expect_invoke()
        .times(1)
        .returning(move |_| Ok(ActionResult::new(body)));
    Arc::new(action)
}
