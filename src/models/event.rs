//! Incoming Lambda event classification.
//!
//! API Gateway proxy integrations deliver events carrying `httpMethod` and
//! `resource`; anything else (direct invokes, test events) is a raw event.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::models::error::AppError;
use crate::models::request::PromptRequest;

/// Lookup key into the route table: `METHOD:/resource`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(String);

impl RouteKey {
    #[must_use]
    pub fn new(method: &str, resource: &str) -> Self {
        Self(format!("{method}:{resource}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The HTTP-originated part of an API Gateway proxy event.
///
/// `body` is kept as delivered; only actions that read a prompt require it to
/// be a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub http_method: String,
    pub resource: String,
    #[serde(default)]
    pub body: Option<Value>,
}

impl ProxyRequest {
    #[must_use]
    pub fn route_key(&self) -> RouteKey {
        RouteKey::new(&self.http_method, &self.resource)
    }

    /// Parses the JSON-encoded body into a prompt request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the body is absent, is not a string,
    /// is not JSON, or lacks a `prompt` field.
    pub fn prompt_request(&self) -> Result<PromptRequest, AppError> {
        match &self.body {
            None | Some(Value::Null) => {
                Err(AppError::Validation("request body is missing".to_string()))
            }
            Some(Value::String(body)) => Ok(serde_json::from_str(body)?),
            Some(_) => Err(AppError::Validation(
                "request body must be a JSON-encoded string".to_string(),
            )),
        }
    }
}

/// An invocation event, classified once when it enters the router.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// HTTP request forwarded by API Gateway
    Proxy(ProxyRequest),
    /// Any other invocation payload
    Raw(Value),
}

impl Event {
    /// Normalizes the payload through a JSON round-trip and classifies it.
    ///
    /// An event is a proxy event when it carries both `httpMethod` and
    /// `resource` keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the payload does not survive the
    /// JSON round-trip, or if a proxy event's `httpMethod` or `resource` is
    /// not a string.
    pub fn from_payload<T: Serialize>(payload: &T) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(&serde_json::to_string(payload)?)?;

        let is_proxy = value.get("httpMethod").is_some() && value.get("resource").is_some();

        if is_proxy {
            Ok(Self::Proxy(serde_json::from_value(value)?))
        } else {
            Ok(Self::Raw(value))
        }
    }
}
