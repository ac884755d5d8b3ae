use async_trait::async_trait;
use aws_sdk_bedrockagent::types::{IngestionJob, IngestionJobStatistics};
use aws_sdk_bedrockagentruntime::types::{
    Citation, GuadrailAction, KnowledgeBaseRetrieveAndGenerateConfiguration,
    RetrievalResultContent, RetrievalResultContentColumnType, RetrievalResultContentType,
    RetrievalResultLocation, RetrieveAndGenerateConfiguration, RetrieveAndGenerateInput,
    RetrieveAndGenerateType, RetrievedReference, TextResponsePart,
};
use aws_smithy_types::DateTime;
use aws_smithy_types::date_time::Format;
use lambda_runtime::tracing::debug;
use serde_json::{Map, Value, json};

use super::{IngestionJobRequest, KnowledgeBase, RetrieveAndGenerateRequest};
use crate::models::AppError;
use crate::utils::{document_to_json, upstream_error};

const AGENT_RUNTIME_SERVICE: &str = "bedrock-agent-runtime";
const AGENT_SERVICE: &str = "bedrock-agent";

/// `KnowledgeBase` backed by the Bedrock agent APIs.
#[derive(Clone)]
pub struct BedrockKnowledgeBase {
    runtime: aws_sdk_bedrockagentruntime::Client,
    agent: aws_sdk_bedrockagent::Client,
}

impl BedrockKnowledgeBase {
    #[must_use]
    pub const fn new(
        runtime: aws_sdk_bedrockagentruntime::Client,
        agent: aws_sdk_bedrockagent::Client,
    ) -> Self {
        Self { runtime, agent }
    }

    #[must_use]
    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(
            aws_sdk_bedrockagentruntime::Client::new(config),
            aws_sdk_bedrockagent::Client::new(config),
        )
    }
}

fn build_error(service: &str, error: &impl std::fmt::Display) -> AppError {
    AppError::upstream(service, error.to_string())
}

/// Inserts `value` under `key` only when present, matching the service's
/// habit of omitting absent members.
fn insert_some(map: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

fn format_time(time: &DateTime) -> Option<String> {
    time.fmt(Format::DateTime).ok()
}

fn url_location(url: Option<&str>) -> Value {
    let mut map = Map::new();
    insert_some(&mut map, "url", url);
    Value::Object(map)
}

fn location_to_json(location: &RetrievalResultLocation) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), json!(location.r#type().as_str()));
    insert_some(
        &mut map,
        "s3Location",
        location.s3_location().map(|s3| {
            let mut inner = Map::new();
            insert_some(&mut inner, "uri", s3.uri());
            Value::Object(inner)
        }),
    );
    insert_some(&mut map, "webLocation", location.web_location().map(|l| url_location(l.url())));
    insert_some(
        &mut map,
        "confluenceLocation",
        location.confluence_location().map(|l| url_location(l.url())),
    );
    insert_some(
        &mut map,
        "salesforceLocation",
        location.salesforce_location().map(|l| url_location(l.url())),
    );
    insert_some(
        &mut map,
        "sharePointLocation",
        location.share_point_location().map(|l| url_location(l.url())),
    );
    insert_some(
        &mut map,
        "oneDriveLocation",
        location.one_drive_location().map(|l| url_location(l.url())),
    );
    insert_some(
        &mut map,
        "googleDriveLocation",
        location.google_drive_location().map(|l| url_location(l.url())),
    );
    insert_some(
        &mut map,
        "customDocumentLocation",
        location.custom_document_location().map(|l| {
            let mut inner = Map::new();
            insert_some(&mut inner, "id", l.id());
            Value::Object(inner)
        }),
    );
    insert_some(
        &mut map,
        "kendraDocumentLocation",
        location.kendra_document_location().map(|l| {
            let mut inner = Map::new();
            insert_some(&mut inner, "uri", l.uri());
            Value::Object(inner)
        }),
    );
    insert_some(
        &mut map,
        "sqlLocation",
        location.sql_location().map(|l| {
            let mut inner = Map::new();
            insert_some(&mut inner, "query", l.query());
            Value::Object(inner)
        }),
    );
    Value::Object(map)
}

fn content_to_json(content: &RetrievalResultContent) -> Value {
    let mut map = Map::new();
    insert_some(&mut map, "type", content.r#type().map(RetrievalResultContentType::as_str));
    map.insert("text".to_string(), json!(content.text()));
    insert_some(&mut map, "byteContent", content.byte_content());
    if !content.row().is_empty() {
        let row = content
            .row()
            .iter()
            .map(|column| {
                let mut cell = Map::new();
                insert_some(&mut cell, "columnName", column.column_name());
                insert_some(&mut cell, "columnValue", column.column_value());
                insert_some(&mut cell, "type", column.r#type().map(RetrievalResultContentColumnType::as_str));
                Value::Object(cell)
            })
            .collect::<Vec<_>>();
        map.insert("row".to_string(), Value::Array(row));
    }
    Value::Object(map)
}

fn reference_to_json(reference: &RetrievedReference) -> Value {
    let mut map = Map::new();
    insert_some(&mut map, "content", reference.content().map(content_to_json));
    insert_some(&mut map, "location", reference.location().map(location_to_json));
    insert_some(
        &mut map,
        "metadata",
        reference.metadata().map(|metadata| {
            metadata
                .iter()
                .map(|(key, value)| (key.clone(), document_to_json(value)))
                .collect::<Map<_, _>>()
        }),
    );
    Value::Object(map)
}

fn text_part_to_json(part: &TextResponsePart) -> Value {
    let mut map = Map::new();
    insert_some(&mut map, "text", part.text());
    insert_some(
        &mut map,
        "span",
        part.span().map(|span| {
            let mut inner = Map::new();
            insert_some(&mut inner, "start", span.start());
            insert_some(&mut inner, "end", span.end());
            Value::Object(inner)
        }),
    );
    Value::Object(map)
}

fn citation_to_json(citation: &Citation) -> Value {
    let mut map = Map::new();
    insert_some(
        &mut map,
        "generatedResponsePart",
        citation.generated_response_part().map(|part| {
            let mut inner = Map::new();
            insert_some(&mut inner, "textResponsePart", part.text_response_part().map(text_part_to_json));
            Value::Object(inner)
        }),
    );
    map.insert(
        "retrievedReferences".to_string(),
        citation
            .retrieved_references()
            .iter()
            .map(reference_to_json)
            .collect(),
    );
    Value::Object(map)
}

fn statistics_to_json(statistics: &IngestionJobStatistics) -> Value {
    json!({
        "numberOfDocumentsScanned": statistics.number_of_documents_scanned(),
        "numberOfMetadataDocumentsScanned": statistics.number_of_metadata_documents_scanned(),
        "numberOfNewDocumentsIndexed": statistics.number_of_new_documents_indexed(),
        "numberOfModifiedDocumentsIndexed": statistics.number_of_modified_documents_indexed(),
        "numberOfMetadataDocumentsModified": statistics.number_of_metadata_documents_modified(),
        "numberOfDocumentsDeleted": statistics.number_of_documents_deleted(),
        "numberOfDocumentsFailed": statistics.number_of_documents_failed(),
        "numberOfDocumentsSkipped": statistics.number_of_documents_skipped(),
    })
}

fn ingestion_job_to_json(job: &IngestionJob) -> Value {
    let mut map = Map::new();
    map.insert("knowledgeBaseId".to_string(), json!(job.knowledge_base_id()));
    map.insert("dataSourceId".to_string(), json!(job.data_source_id()));
    map.insert("ingestionJobId".to_string(), json!(job.ingestion_job_id()));
    insert_some(&mut map, "description", job.description());
    map.insert("status".to_string(), json!(job.status().as_str()));
    insert_some(&mut map, "statistics", job.statistics().map(statistics_to_json));
    if !job.failure_reasons().is_empty() {
        map.insert("failureReasons".to_string(), json!(job.failure_reasons()));
    }
    insert_some(&mut map, "startedAt", format_time(job.started_at()));
    insert_some(&mut map, "updatedAt", format_time(job.updated_at()));
    insert_some(&mut map, "textReadyAt", job.text_ready_at().and_then(format_time));
    Value::Object(map)
}

#[async_trait]
impl KnowledgeBase for BedrockKnowledgeBase {
    async fn retrieve_and_generate(
        &self,
        request: RetrieveAndGenerateRequest,
    ) -> Result<Value, AppError> {
        let input = RetrieveAndGenerateInput::builder()
            .text(request.prompt)
            .build()
            .map_err(|e| build_error(AGENT_RUNTIME_SERVICE, &e))?;

        let knowledge_base = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(request.knowledge_base_id)
            .model_arn(request.model_arn)
            .build()
            .map_err(|e| build_error(AGENT_RUNTIME_SERVICE, &e))?;

        let configuration = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(knowledge_base)
            .build()
            .map_err(|e| build_error(AGENT_RUNTIME_SERVICE, &e))?;

        let response = self
            .runtime
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(configuration)
            .set_session_id(request.session_id)
            .send()
            .await
            .map_err(|e| upstream_error(AGENT_RUNTIME_SERVICE, e))?;

        debug!(session_id = %response.session_id(), "Retrieve and generate completed");

        let mut body = Map::new();
        body.insert("sessionId".to_string(), json!(response.session_id()));
        insert_some(
            &mut body,
            "output",
            response.output().map(|output| json!({ "text": output.text() })),
        );
        body.insert(
            "citations".to_string(),
            response.citations().iter().map(citation_to_json).collect(),
        );
        insert_some(
            &mut body,
            "guardrailAction",
            response.guardrail_action().map(GuadrailAction::as_str),
        );
        Ok(Value::Object(body))
    }

    async fn start_ingestion_job(&self, request: IngestionJobRequest) -> Result<Value, AppError> {
        let response = self
            .agent
            .start_ingestion_job()
            .knowledge_base_id(request.knowledge_base_id)
            .data_source_id(request.data_source_id)
            .send()
            .await
            .map_err(|e| upstream_error(AGENT_SERVICE, e))?;

        let mut body = Map::new();
        insert_some(
            &mut body,
            "ingestionJob",
            response.ingestion_job().map(ingestion_job_to_json),
        );
        Ok(Value::Object(body))
    }
}
