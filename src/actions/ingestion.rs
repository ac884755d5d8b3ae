use lambda_runtime::tracing::{debug, error, info};
use serde_json::Value;
use std::sync::Arc;

use crate::clients::{IngestionJobRequest, KnowledgeBase};
use crate::config::Settings;
use crate::models::AppError;

/// Starts a knowledge base ingestion job when new documents land in the
/// knowledge base bucket. Not an HTTP route: invoked by S3 notifications.
pub struct TriggerIngestion {
    knowledge_base: Arc<dyn KnowledgeBase>,
    settings: Arc<dyn Settings>,
}

impl TriggerIngestion {
    #[must_use]
    pub fn new(knowledge_base: Arc<dyn KnowledgeBase>, settings: Arc<dyn Settings>) -> Self {
        Self {
            knowledge_base,
            settings,
        }
    }

    /// Starts the ingestion job and returns the service response unshaped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if either identifier is not set and
    /// `AppError::Upstream` if the job cannot be started.
    pub async fn run(&self, event: &Value) -> Result<Value, AppError> {
        debug!(event = %event, "Storage event received");
        info!(records = event_record_count(event), "Starting ingestion job");

        let request = IngestionJobRequest {
            knowledge_base_id: self.settings.knowledge_base_id()?,
            data_source_id: self.settings.data_source_id()?,
        };

        self.knowledge_base
            .start_ingestion_job(request)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to start ingestion job");
                e
            })
    }
}

/// Number of `Records` in an S3 notification, zero for any other payload.
fn event_record_count(event: &Value) -> usize {
    event
        .get("Records")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
