//! HTTP transport for chat-completion calls

pub mod openrouter;

pub use openrouter::HttpTransport;

use reqwest::header::HeaderMap;

/// One POST of a JSON body, answered by a parsed JSON body.
/// A body that does not parse is a transport failure.
#[allow(async_fn_in_trait)]
pub trait Transport
{   async fn post_json(
      &self
    , url: &str
    , headers: &HeaderMap
    , body: &crate::request::ChatRequest
    ) -> Result<serde_json::Value, crate::error::Error>;
}
