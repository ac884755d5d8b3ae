use async_trait::async_trait;
use serde_json::json;

use super::Action;
use crate::models::{ActionResult, AppError, ProxyRequest};

/// Reports the deployed package name and version on `GET /`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Version;

#[async_trait]
impl Action for Version {
    async fn invoke(&self, _request: ProxyRequest) -> Result<ActionResult, AppError> {
        Ok(ActionResult::new(json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        })))
    }
}
