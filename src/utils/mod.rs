//! Utility functions shared across the application.

use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use aws_smithy_types::{Document, Number};
use serde_json::Value;
use uuid::Uuid;

use crate::models::AppError;

/// Generates a fresh object key: a time-ordered UUID plus `extension`.
///
/// UUIDv7 strings sort lexicographically in creation order.
#[must_use]
pub fn new_object_key(extension: &str) -> String {
    format!("{}.{extension}", Uuid::now_v7())
}

/// Converts a JSON value into a smithy `Document`, as required for
/// model-specific request fields.
#[must_use]
pub fn json_to_document(value: Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(b),
        Value::Number(n) => Document::Number(
            n.as_u64().map_or_else(
                || {
                    n.as_i64()
                        .map_or_else(|| Number::Float(n.as_f64().unwrap_or_default()), Number::NegInt)
                },
                Number::PosInt,
            ),
        ),
        Value::String(s) => Document::String(s),
        Value::Array(items) => Document::Array(items.into_iter().map(json_to_document).collect()),
        Value::Object(map) => Document::Object(
            map.into_iter()
                .map(|(key, value)| (key, json_to_document(value)))
                .collect(),
        ),
    }
}

/// Converts a smithy `Document` back into JSON, e.g. for retrieval metadata.
#[must_use]
pub fn document_to_json(document: &Document) -> Value {
    match document {
        Document::Null => Value::Null,
        Document::Bool(b) => Value::Bool(*b),
        Document::Number(Number::PosInt(n)) => Value::from(*n),
        Document::Number(Number::NegInt(n)) => Value::from(*n),
        Document::Number(Number::Float(n)) => Value::from(*n),
        Document::String(s) => Value::String(s.clone()),
        Document::Array(items) => items.iter().map(document_to_json).collect(),
        Document::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), document_to_json(value)))
                .collect(),
        ),
    }
}

/// Maps an AWS SDK error to `AppError::Upstream`, keeping the service error
/// code and message when the SDK exposes them. Otherwise the message is the
/// full cause chain, `outer: inner: root`.
pub fn upstream_error<E>(service: &str, error: E) -> AppError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = error.code().map(str::to_string);
    let message = error.message().map(str::to_string);

    AppError::Upstream {
        service: service.to_string(),
        message: message.unwrap_or_else(|| format!("{:#}", anyhow::Error::new(error))),
        code,
    }
}
