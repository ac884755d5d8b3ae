pub mod error;
pub mod event;
pub mod request;
pub mod response;

pub use error::AppError;
pub use event::{Event, ProxyRequest, RouteKey};
pub use request::PromptRequest;
pub use response::{ActionResult, ErrorBody, ErrorPayload, ProxyResponse, TextResponse};
