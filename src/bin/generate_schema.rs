//! Schema generator for the API Gateway request and response models.
//!
//! This binary writes `api_schema.json` describing every route of the
//! proxy Lambda together with JSON Schemas of its request body, success body
//! and error body.

use bedrock_lambda_api::schema::api_schema;
use std::fs;

fn main() {
    let schema = api_schema().unwrap_or_else(|e| {
        eprintln!("Failed to generate schema: {e}");
        std::process::exit(1);
    });

    let count = schema.as_array().map_or(0, Vec::len);

    let json = serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
        eprintln!("Failed to serialize schema: {e}");
        std::process::exit(1);
    });

    fs::write("api_schema.json", json).unwrap_or_else(|e| {
        eprintln!("Failed to write api_schema.json: {e}");
        std::process::exit(1);
    });

    println!("✅ Generated api_schema.json with {count} route(s)");
}
