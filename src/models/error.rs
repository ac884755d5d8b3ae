//! Custom error types for the Bedrock Lambda API.
//!
//! Every failure that can leave an action or the router is one of these kinds.
//! Only `NotFound` is ever turned into a response envelope; the rest propagate
//! out of the invocation as a Lambda `Diagnostic`.

use std::fmt;

/// Literal message carried by an unmatched route.
pub const ROUTE_NOT_FOUND: &str = "[404] Route Not Found";

/// Custom error type for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required request field is missing or the body cannot be parsed
    Validation(String),
    /// A call to an AWS service failed
    Upstream {
        service: String,
        message: String,
        code: Option<String>,
    },
    /// A required environment variable is not set
    Configuration(String),
    /// No route is registered for the request
    NotFound(String),
}

impl AppError {
    /// The route-not-found condition produced by the router.
    #[must_use]
    pub fn route_not_found() -> Self {
        Self::NotFound(ROUTE_NOT_FOUND.to_string())
    }

    /// Builds an upstream error without a service error code.
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Human readable message, without the kind prefix used by `Display`.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Configuration(msg) | Self::NotFound(msg) => msg,
            Self::Upstream { message, .. } => message,
        }
    }

    /// Service error code, when the failing call reported one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Upstream { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Lambda `errorType` used when the error escapes the invocation.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "InvalidInput",
            Self::Upstream { .. } => "UpstreamError",
            Self::Configuration(_) => "ConfigurationError",
            Self::NotFound(_) => "NotFound",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Invalid request: {msg}"),
            Self::Upstream {
                service,
                message,
                code: Some(code),
            } => write!(f, "{service} error ({code}): {message}"),
            Self::Upstream {
                service,
                message,
                code: None,
            } => write!(f, "{service} error: {message}"),
            Self::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            Self::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<AppError> for lambda_runtime::Diagnostic {
    fn from(error: AppError) -> Self {
        Self {
            error_type: error.error_type().to_string(),
            error_message: error.to_string(),
        }
    }
}
