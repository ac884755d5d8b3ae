//! Response shapes: action results and the API Gateway proxy envelope.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::error::AppError;

/// Result returned by every action: `{"body": <value>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub body: Value,
}

impl ActionResult {
    pub fn new(body: impl Into<Value>) -> Self {
        Self { body: body.into() }
    }
}

/// Success body of the text and image routes, used for schema generation.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TextResponse {
    #[schemars(description = "Model output text, or a pre-signed image URL for generate-image")]
    pub body: String,
}

/// Error fields extracted from whatever error reached the envelope builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPayload {
    pub message: Option<String>,
    pub code: Option<String>,
}

impl From<&AppError> for ErrorPayload {
    fn from(error: &AppError) -> Self {
        Self {
            message: Some(error.message().to_string()),
            code: error.code().map(str::to_string),
        }
    }
}

/// Serialized body of an error envelope.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_message: Option<String>,
    pub error_code: Option<String>,
}

impl From<&ErrorPayload> for ErrorBody {
    fn from(payload: &ErrorPayload) -> Self {
        Self {
            error_message: payload.message.clone(),
            error_code: payload.code.clone(),
        }
    }
}

/// API Gateway Lambda proxy integration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}
