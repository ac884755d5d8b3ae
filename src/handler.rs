use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::{Value, json};

use crate::models::{AppError, ErrorPayload, Event};
use crate::response::{build_error, build_success};
use crate::routes::RouteTable;

/// Routes one invocation payload.
///
/// Proxy events are dispatched through the route table and always answered
/// with an envelope: 200 for a successful action, 500 when no route matches.
/// Raw events are logged and answered with `{}`.
///
/// # Errors
///
/// Any error returned by the dispatched action is passed through unchanged;
/// it is never wrapped in an error envelope.
pub async fn route_event(routes: &RouteTable, payload: &Value) -> Result<Value, AppError> {
    match Event::from_payload(payload)? {
        Event::Proxy(request) => {
            let route_key = request.route_key();
            info!("[REQUEST] {}", route_key);

            let response = match routes.lookup(&route_key) {
                Some(action) => build_success(&action.invoke(request).await?)?,
                None => {
                    let not_found = AppError::route_not_found();
                    debug!(route_key = %route_key, "No route registered");
                    build_error(&ErrorPayload::from(&not_found))?
                }
            };

            Ok(serde_json::to_value(response)?)
        }
        Event::Raw(event) => {
            info!("[UNKNOWN] {}", event);
            Ok(json!({}))
        }
    }
}

/// Lambda event handler for the API Gateway function.
/// Logs the full event when `RUST_LOG=debug/trace`.
///
/// # Errors
///
/// Returns a `Diagnostic` error with one of the following types:
///
/// - `InvalidInput`: The request body is missing, malformed, or lacks `prompt`
/// - `UpstreamError`: A Bedrock or S3 call failed
/// - `ConfigurationError`: A required environment variable is not set
pub async fn function_handler(
    routes: &RouteTable,
    event: LambdaEvent<Value>,
) -> Result<Value, Diagnostic> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, payload = %payload, "Invocation received");

    route_event(routes, &payload).await.map_err(|e| {
        error!(error_type = e.error_type(), error = %e, "Invocation failed");
        Diagnostic::from(e)
    })
}
