//! JSON Schema descriptions of the API routes.
//!
//! Used by the `generate-schema` binary to produce request/response models for
//! API Gateway.

use schemars::{JsonSchema, schema_for};
use serde_json::{Value, json};

use crate::models::{ErrorBody, PromptRequest, TextResponse};
use crate::routes;

/// A route with its documented request and success body.
pub struct RouteSchema {
    pub route: (&'static str, &'static str),
    pub description: &'static str,
    pub request_schema: Option<Value>,
    pub response_schema: Value,
}

/// Generates a schema for `T` in the subset API Gateway models accept.
///
/// # Errors
///
/// Returns an error if the schema cannot be represented as JSON.
pub fn api_gateway_schema<T: JsonSchema>() -> Result<Value, serde_json::Error> {
    let mut schema = serde_json::to_value(schema_for!(T))?;

    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");

        if let Some(properties) = obj.get_mut("properties").and_then(Value::as_object_mut) {
            for prop_value in properties.values_mut() {
                if let Some(prop_obj) = prop_value.as_object_mut() {
                    prop_obj.remove("format");
                }
            }
        }
    }

    Ok(schema)
}

/// Every HTTP route with its schemas.
///
/// # Errors
///
/// Returns an error if a schema cannot be represented as JSON.
pub fn route_schemas() -> Result<Vec<RouteSchema>, serde_json::Error> {
    let prompt = api_gateway_schema::<PromptRequest>()?;
    let text = api_gateway_schema::<TextResponse>()?;
    let object = json!({
        "type": "object",
        "properties": { "body": { "type": "object" } },
        "required": ["body"]
    });

    Ok(vec![
        RouteSchema {
            route: routes::VERSION,
            description: "Deployed package name and version.",
            request_schema: None,
            response_schema: object.clone(),
        },
        RouteSchema {
            route: routes::GENERATE_IMAGE,
            description: "Generate a 1024x1024 image with Titan Image Generator G1 and return a pre-signed download URL valid for one hour.",
            request_schema: Some(prompt.clone()),
            response_schema: text.clone(),
        },
        RouteSchema {
            route: routes::SUMMARIZE_TEXT,
            description: "Summarize the prompt text with Claude 3 Sonnet.",
            request_schema: Some(prompt.clone()),
            response_schema: text.clone(),
        },
        RouteSchema {
            route: routes::INTERPRET_TEXT,
            description: "Interpret free text with Cohere Command R+.",
            request_schema: Some(prompt.clone()),
            response_schema: text.clone(),
        },
        RouteSchema {
            route: routes::GENERATE_CODE,
            description: "Generate code with Llama 2 Chat 70B.",
            request_schema: Some(prompt.clone()),
            response_schema: text,
        },
        RouteSchema {
            route: routes::KNOWLEDGE_BASE_QUERY,
            description: "Answer the prompt from the knowledge base. Pass session_id to continue a conversation.",
            request_schema: Some(prompt),
            response_schema: object,
        },
    ])
}

/// The complete document written to `api_schema.json`.
///
/// # Errors
///
/// Returns an error if a schema cannot be represented as JSON.
pub fn api_schema() -> Result<Value, serde_json::Error> {
    let error_schema = api_gateway_schema::<ErrorBody>()?;

    let routes: Vec<Value> = route_schemas()?
        .into_iter()
        .map(|schema| {
            let (method, path) = schema.route;
            json!({
                "method": method,
                "path": path,
                "description": schema.description,
                "requestSchema": schema.request_schema,
                "responseSchema": schema.response_schema,
                "errorSchema": error_schema,
            })
        })
        .collect();

    Ok(Value::Array(routes))
}
