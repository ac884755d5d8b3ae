use bedrock_lambda_api::clients::Services;
use bedrock_lambda_api::handler::function_handler;
use bedrock_lambda_api::routes::RouteTable;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    // Clients are built once per cold start and shared by every invocation
    let services = Services::from_env().await;
    let routes = RouteTable::standard(&services);
    let routes = &routes;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(routes, event).await
    }))
    .await
}
