//! Static route table mapping `METHOD:/resource` to an action.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::actions::{
    Action, GenerateCode, GenerateImage, InterpretText, KnowledgeBaseQuery, SummarizeText, Version,
};
use crate::clients::Services;
use crate::models::RouteKey;

pub const VERSION: (&str, &str) = ("GET", "/");
pub const GENERATE_IMAGE: (&str, &str) = ("POST", "/generate-image");
pub const SUMMARIZE_TEXT: (&str, &str) = ("POST", "/summarize-text");
pub const INTERPRET_TEXT: (&str, &str) = ("POST", "/interpret-text");
pub const GENERATE_CODE: (&str, &str) = ("POST", "/generate-code");
pub const KNOWLEDGE_BASE_QUERY: (&str, &str) = ("POST", "/knowledge-base-query");

#[derive(Default, Clone)]
pub struct RouteTable {
    routes: BTreeMap<RouteKey, Arc<dyn Action>>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `action` to `(method, path)`, replacing any earlier binding.
    #[must_use]
    pub fn register(mut self, (method, path): (&str, &str), action: Arc<dyn Action>) -> Self {
        self.routes.insert(RouteKey::new(method, path), action);
        self
    }

    #[must_use]
    pub fn lookup(&self, key: &RouteKey) -> Option<&dyn Action> {
        self.routes.get(key).map(Arc::as_ref)
    }

    pub fn keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.routes.keys()
    }

    /// The routes exposed by the API Gateway deployment.
    #[must_use]
    pub fn standard(services: &Services) -> Self {
        Self::new()
            .register(VERSION, Arc::new(Version))
            .register(
                GENERATE_IMAGE,
                Arc::new(GenerateImage::new(
                    Arc::clone(&services.runtime),
                    Arc::clone(&services.object_store),
                    Arc::clone(&services.settings),
                )),
            )
            .register(
                SUMMARIZE_TEXT,
                Arc::new(SummarizeText::new(Arc::clone(&services.runtime))),
            )
            .register(
                INTERPRET_TEXT,
                Arc::new(InterpretText::new(Arc::clone(&services.runtime))),
            )
            .register(
                GENERATE_CODE,
                Arc::new(GenerateCode::new(Arc::clone(&services.code_runtime))),
            )
            .register(
                KNOWLEDGE_BASE_QUERY,
                Arc::new(KnowledgeBaseQuery::new(
                    Arc::clone(&services.knowledge_base),
                    Arc::clone(&services.settings),
                )),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::MockAction;

    #[test]
    fn test_lookup_exact_match_only() {
        let routes = RouteTable::new().register(GENERATE_CODE, Arc::new(MockAction::new()));

        assert!(routes.lookup(&RouteKey::new("POST", "/generate-code")).is_some());
        assert!(routes.lookup(&RouteKey::new("GET", "/generate-code")).is_none());
        assert!(routes.lookup(&RouteKey::new("POST", "/generate-code/")).is_none());
        assert!(routes.lookup(&RouteKey::new("post", "/generate-code")).is_none());
    }

    #[test]
    fn test_keys_are_sorted() {
        let routes = RouteTable::new()
            .register(SUMMARIZE_TEXT, Arc::new(MockAction::new()))
            .register(VERSION, Arc::new(MockAction::new()));

        let keys: Vec<&str> = routes.keys().map(RouteKey::as_str).collect();
        assert_eq!(keys, vec!["GET:/", "POST:/summarize-text"]);
    }
}
