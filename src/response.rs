//! Envelope builder for API Gateway proxy responses.
//!
//! Only two status codes ever leave this module: 200 for a successful action
//! and 500 for a routed error. Both carry the same fixed CORS headers.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{AppError, ErrorBody, ErrorPayload, ProxyResponse};

const STATUS_OK: u16 = 200;
const STATUS_ERROR: u16 = 500;

/// Fixed headers attached to every proxy response.
const CORS_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Credentials", "true"),
];

fn cors_headers() -> BTreeMap<String, String> {
    CORS_HEADERS
        .iter()
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect()
}

/// Wraps a serializable action result in a 200 envelope.
///
/// # Errors
///
/// Returns `AppError::Validation` if the result cannot be serialized to JSON.
pub fn build_success<T: Serialize>(result: &T) -> Result<ProxyResponse, AppError> {
    Ok(ProxyResponse {
        status_code: STATUS_OK,
        body: serde_json::to_string(result)?,
        headers: cors_headers(),
    })
}

/// Wraps an error payload in a 500 envelope.
///
/// # Errors
///
/// Returns `AppError::Validation` if the error body cannot be serialized.
pub fn build_error(payload: &ErrorPayload) -> Result<ProxyResponse, AppError> {
    Ok(ProxyResponse {
        status_code: STATUS_ERROR,
        body: serde_json::to_string(&ErrorBody::from(payload))?,
        headers: cors_headers(),
    })
}
