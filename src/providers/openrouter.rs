use log::{debug, trace};
use reqwest::header::HeaderMap;

/// reqwest-backed transport. No timeout is configured.
/// Failures are logged at debug only; the client reports them.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport
{   http_client: reqwest::Client
}

impl HttpTransport
{   pub fn new() -> Self
    {   HttpTransport
        {   http_client: reqwest::Client::new()
        }
    }
}

impl super::Transport for HttpTransport
{   async fn post_json(
      &self
    , url: &str
    , headers: &HeaderMap
    , body: &crate::request::ChatRequest
    ) -> Result<serde_json::Value, crate::error::Error>
    {   let response = self.http_client
          .post(url)
          .headers(headers.clone())
          .json(body)
          .send()
          .await
          .map_err(|e| {
            debug!("HTTP error: {}", e);
            crate::error::Error::from(e)
          })?;

        // Status is logged only; the body shape decides the outcome.
        trace!("Response status: {}", response.status());

        response.json().await.map_err(|e| {
          debug!("Body is not JSON: {}", e);
          crate::error::Error::from(e)
        })
    }
}
