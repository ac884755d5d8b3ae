use anyhow::Result;
use bedrock_lambda_api::actions::TriggerIngestion;
use bedrock_lambda_api::clients::Services;
use lambda_runtime::{
    Diagnostic, Error, LambdaEvent, service_fn,
    tracing::{error, info},
};
use serde_json::Value;

/// Handles S3 object-created notifications for the knowledge base bucket.
///
/// The storage event itself only triggers the job; the knowledge base and data
/// source come from `KNOWLEDGE_BASE_ID` and `DATA_SOURCE_ID`.
async fn ingestion_handler(
    trigger: &TriggerIngestion,
    event: LambdaEvent<Value>,
) -> Result<Value, Diagnostic> {
    info!(request_id = %event.context.request_id, "Ingestion trigger invoked");

    trigger.run(&event.payload).await.map_err(|e| {
        error!(error = %e, "Ingestion trigger failed");
        Diagnostic::from(e)
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let services = Services::from_env().await;
    let trigger = TriggerIngestion::new(services.knowledge_base, services.settings);
    let trigger = &trigger;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        ingestion_handler(trigger, event).await
    }))
    .await
}
