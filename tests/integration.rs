// Integration tests for the full request flow
// These drive function_handler with the standard route table and mocked AWS clients
#![allow(clippy::unwrap_used)]

mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bedrock_lambda_api::handler::function_handler;
use bedrock_lambda_api::models::{AppError, ProxyResponse};
use bedrock_lambda_api::routes::RouteTable;
use common::{TestServices, lambda_event, proxy_event};
use serde_json::{Value, json};

fn body_of(response: Value) -> Value {
    let envelope: ProxyResponse = serde_json::from_value(response).unwrap();
    assert_eq!(envelope.status_code, 200);
    serde_json::from_str(&envelope.body).unwrap()
}

#[tokio::test]
async fn test_full_generate_code_flow_uses_code_runtime() {
    let mut services = TestServices::new();
    services
        .code_runtime
        .expect_converse()
        .withf(|req| req.model_id == "meta.llama2-70b-chat-v1" && req.prompt == "write a loop")
        .times(1)
        .returning(|_| Ok("for i in range(10):\n    print(i)".to_string()));
    services.runtime.expect_converse().times(0);

    let routes = RouteTable::standard(&services.build());
    let event = json!({
        "httpMethod": "POST",
        "resource": "/generate-code",
        "body": "{\"prompt\":\"write a loop\"}"
    });

    let response = function_handler(&routes, lambda_event(event)).await.unwrap();
    assert_eq!(body_of(response), json!({"body": "for i in range(10):\n    print(i)"}));
}

#[tokio::test]
async fn test_full_summarize_flow() {
    let mut services = TestServices::new();
    services
        .runtime
        .expect_converse()
        .withf(|req| req.model_id == "anthropic.claude-3-sonnet-20240229-v1:0")
        .times(1)
        .returning(|_| Ok("Short summary.".to_string()));

    let routes = RouteTable::standard(&services.build());
    let response = function_handler(
        &routes,
        lambda_event(proxy_event("POST", "/summarize-text", "A very long text")),
    )
    .await
    .unwrap();

    assert_eq!(body_of(response), json!({"body": "Short summary."}));
}

#[tokio::test]
async fn test_full_interpret_flow() {
    let mut services = TestServices::new();
    services
        .runtime
        .expect_converse()
        .withf(|req| req.model_id == "cohere.command-r-plus-v1:0")
        .times(1)
        .returning(|_| Ok("A request for help.".to_string()));

    let routes = RouteTable::standard(&services.build());
    let response = function_handler(
        &routes,
        lambda_event(proxy_event("POST", "/interpret-text", "SOS")),
    )
    .await
    .unwrap();

    assert_eq!(body_of(response), json!({"body": "A request for help."}));
}

#[tokio::test]
async fn test_full_generate_image_flow() {
    let mut services = TestServices::new();
    services
        .runtime
        .expect_invoke_model()
        .withf(|req| req.model_id == "amazon.titan-image-generator-v1")
        .times(1)
        .returning(|_| Ok(json!({"images": [STANDARD.encode(b"png-bytes")]})));
    services
        .object_store
        .expect_put_object()
        .withf(|req| req.bucket == "test-assets" && req.body == b"png-bytes")
        .times(1)
        .returning(|_| Ok(()));
    services
        .object_store
        .expect_presigned_get_url()
        .withf(|req| req.expires_in.as_secs() == 3600)
        .times(1)
        .returning(|req| Ok(format!("https://{}.s3.amazonaws.com/{}?sig=1", req.bucket, req.key)));

    let routes = RouteTable::standard(&services.build());
    let response = function_handler(
        &routes,
        lambda_event(proxy_event("POST", "/generate-image", "a red bicycle")),
    )
    .await
    .unwrap();

    let body = body_of(response);
    let url = body["body"].as_str().unwrap();
    assert!(url.starts_with("https://test-assets.s3.amazonaws.com/"));
    assert!(url.contains(".png?sig=1"));
}

#[tokio::test]
async fn test_full_knowledge_base_flow() {
    let mut services = TestServices::new();
    services
        .knowledge_base
        .expect_retrieve_and_generate()
        .withf(|req| req.knowledge_base_id == "KBTEST0001" && req.session_id.as_deref() == Some("s-9"))
        .times(1)
        .returning(|_| Ok(json!({"sessionId": "s-9", "output": {"text": "Yes."}, "citations": []})));

    let routes = RouteTable::standard(&services.build());
    let event = json!({
        "httpMethod": "POST",
        "resource": "/knowledge-base-query",
        "body": "{\"prompt\":\"Is it open?\",\"session_id\":\"s-9\"}"
    });

    let response = function_handler(&routes, lambda_event(event)).await.unwrap();
    assert_eq!(body_of(response)["body"]["output"]["text"], "Yes.");
}

#[tokio::test]
async fn test_version_route() {
    let routes = RouteTable::standard(&TestServices::new().build());
    let event = json!({"httpMethod": "GET", "resource": "/", "body": null});

    let response = function_handler(&routes, lambda_event(event)).await.unwrap();
    let body = body_of(response);
    assert_eq!(body["body"]["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(body["body"]["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_missing_prompt_is_invalid_input() {
    let routes = RouteTable::standard(&TestServices::new().build());
    let event = json!({
        "httpMethod": "POST",
        "resource": "/summarize-text",
        "body": "{\"text\":\"no prompt here\"}"
    });

    let diagnostic = function_handler(&routes, lambda_event(event)).await.unwrap_err();
    assert_eq!(diagnostic.error_type, "InvalidInput");
}

#[tokio::test]
async fn test_malformed_body_is_invalid_input() {
    let routes = RouteTable::standard(&TestServices::new().build());
    let event = json!({
        "httpMethod": "POST",
        "resource": "/interpret-text",
        "body": "invalid json"
    });

    let diagnostic = function_handler(&routes, lambda_event(event)).await.unwrap_err();
    assert_eq!(diagnostic.error_type, "InvalidInput");
}

#[tokio::test]
async fn test_upstream_failure_escapes_as_diagnostic() {
    let mut services = TestServices::new();
    services.runtime.expect_converse().times(1).returning(|_| {
        Err(AppError::Upstream {
            service: "bedrock-runtime".to_string(),
            message: "You don't have access to the model".to_string(),
            code: Some("AccessDeniedException".to_string()),
        })
    });

    let routes = RouteTable::standard(&services.build());
    let diagnostic = function_handler(
        &routes,
        lambda_event(proxy_event("POST", "/summarize-text", "text")),
    )
    .await
    .unwrap_err();

    assert_eq!(diagnostic.error_type, "UpstreamError");
    assert!(diagnostic.error_message.contains("AccessDeniedException"));
}

#[tokio::test]
async fn test_unknown_route_flow() {
    let routes = RouteTable::standard(&TestServices::new().build());
    let event = json!({"httpMethod": "DELETE", "resource": "/unknown"});

    let response = function_handler(&routes, lambda_event(event)).await.unwrap();
    assert_eq!(response["statusCode"], 500);
    assert_eq!(
        response["body"],
        "{\"errorMessage\":\"[404] Route Not Found\",\"errorCode\":null}"
    );
}

#[tokio::test]
async fn test_raw_event_flow() {
    let routes = RouteTable::standard(&TestServices::new().build());
    let response = function_handler(&routes, lambda_event(json!({"foo": "bar"})))
        .await
        .unwrap();
    assert_eq!(response, json!({}));
}

#[tokio::test]
async fn test_concurrent_requests() {
    let mut services = TestServices::new();
    services
        .runtime
        .expect_converse()
        .times(10)
        .returning(|req| Ok(format!("summary of {}", req.prompt)));

    let routes = RouteTable::standard(&services.build());

    let requests = (0..10).map(|i| {
        let routes = &routes;
        async move {
            let event = proxy_event("POST", "/summarize-text", &format!("doc {i}"));
            (i, function_handler(routes, lambda_event(event)).await)
        }
    });

    for (i, result) in futures::future::join_all(requests).await {
        let body = body_of(result.unwrap());
        assert_eq!(body["body"], format!("summary of doc {i}"));
    }
}
