use log::{debug, error, trace};
use reqwest::header::{
  HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE
};

use crate::config::AskConfig;
use crate::error::Error;
use crate::providers::{HttpTransport, Transport};
use crate::request::{ChatReply, ChatRequest};

/// Sends one prompt per call to the configured chat-completions endpoint.
///
/// Configuration, endpoint and headers are fixed at construction; `ask`
/// only reads them, so calls are independent of each other.
pub struct PromptClient<T = HttpTransport>
{   config: AskConfig
  , endpoint: String
  , headers: HeaderMap
  , transport: T
}

impl PromptClient<HttpTransport>
{   /// Client over a fresh reqwest transport
    pub fn new(config: AskConfig) -> Result<Self, Error>
    {   Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> PromptClient<T>
{   pub fn with_transport(config: AskConfig, transport: T)
      -> Result<Self, Error>
    {   let headers = build_headers(&config)?;
        let endpoint = config.endpoint();
        debug!(
          "Creating PromptClient for {} (model {})",
          endpoint, config.model
        );
        Ok(PromptClient
        {   config
          , endpoint
          , headers
          , transport
        })
    }

    pub fn config(&self) -> &AskConfig
    {   &self.config
    }

    pub fn endpoint(&self) -> &str
    {   &self.endpoint
    }

    /// Ask once. Every failure is logged at error level before it is
    /// returned.
    pub async fn ask(&self, prompt: &str) -> Result<String, Error>
    {   let request
          = ChatRequest::user_prompt(&self.config.model, prompt);
        trace!(
          "Sending {} byte prompt to {}",
          prompt.len(), self.endpoint
        );

        let body = match self.transport
          .post_json(&self.endpoint, &self.headers, &request)
          .await
        {   Ok(body) => body
          , Err(e) => {
              let e = match e
              {   Error::Transport(_) => e
                , other => Error::Transport(other.to_string())
              };
              error!("{}", e);
              return Err(e);
            }
        };

        match ChatReply::decode(body)
        {   ChatReply::Success(text) => {
              debug!("Received {} byte reply", text.len());
              Ok(text)
            }
          , ChatReply::RemoteError(msg) => {
              let e = Error::Remote(msg);
              error!("{}", e);
              Err(e)
            }
          , ChatReply::Unrecognized(raw) => {
              let e = Error::UnexpectedShape(raw);
              error!("{}", e);
              Err(e)
            }
        }
    }
}

fn build_headers(config: &AskConfig) -> Result<HeaderMap, Error>
{   let mut auth = HeaderValue::from_str(
      &format!("Bearer {}", config.api_key.expose())
    ).map_err(|_| {
      Error::InvalidConfiguration(
        "API key is not a valid header value".to_string()
      )
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(
      CONTENT_TYPE,
      HeaderValue::from_static("application/json")
    );
    Ok(headers)
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::config::ApiKey;
    use serde_json::{json, Value};
    use std::sync::{Mutex, Once};

    /// Keeps every log record as "LEVEL message"
    struct CaptureLogger
    {   records: Mutex<Vec<String>>
    }

    impl log::Log for CaptureLogger
    {   fn enabled(&self, _: &log::Metadata<'_>) -> bool
        {   true
        }

        fn log(&self, record: &log::Record<'_>)
        {   self.records.lock().unwrap().push(
              format!("{} {}", record.level(), record.args())
            );
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger
    {   records: Mutex::new(Vec::new())
    };
    static INSTALL: Once = Once::new();

    fn capture_logs()
    {   INSTALL.call_once(|| {
          let _ = log::set_logger(&CAPTURE);
          log::set_max_level(log::LevelFilter::Trace);
        });
    }

    /// Tests run in parallel, so only ask whether a record exists.
    fn logged(line: &str) -> bool
    {   CAPTURE.records.lock().unwrap()
          .iter()
          .any(|r| r == line)
    }

    struct Recorded
    {   url: String
      , headers: HeaderMap
      , body: ChatRequest
    }

    /// Answers every call with the same canned result
    struct StubTransport
    {   reply: Result<Value, Error>
      , calls: Mutex<Vec<Recorded>>
    }

    impl StubTransport
    {   fn answering(body: Value) -> Self
        {   StubTransport
            {   reply: Ok(body)
              , calls: Mutex::new(vec![])
            }
        }

        fn failing(msg: &str) -> Self
        {   StubTransport
            {   reply: Err(Error::Transport(msg.to_string()))
              , calls: Mutex::new(vec![])
            }
        }
    }

    impl Transport for StubTransport
    {   async fn post_json(
          &self
        , url: &str
        , headers: &HeaderMap
        , body: &ChatRequest
        ) -> Result<Value, Error>
        {   self.calls.lock().unwrap().push(Recorded
            {   url: url.to_string()
              , headers: headers.clone()
              , body: body.clone()
            });
            self.reply.clone()
        }
    }

    fn client(transport: StubTransport) -> PromptClient<StubTransport>
    {   let config = AskConfig::new(ApiKey::new("sk-test"))
          .with_base_url("http://gateway.test/api/v1");
        PromptClient::with_transport(config, transport).unwrap()
    }

    #[test]
    fn happy_path_returns_first_choice()
    {   let c = client(StubTransport::answering(
          json!({"choices":[{"message":{"content":"hello"}}]})
        ));
        let reply = tokio_test::block_on(c.ask("hi"));
        assert_eq!(reply, Ok("hello".to_string()));
    }

    #[test]
    fn remote_error_carries_message()
    {   capture_logs();
        let c = client(StubTransport::answering(
          json!({"error":{"message":"invalid model"}})
        ));
        let err = tokio_test::block_on(c.ask("hi")).unwrap_err();
        assert_eq!(err, Error::Remote("invalid model".to_string()));
        assert!(logged("ERROR API error: invalid model"));
    }

    #[test]
    fn unknown_shape_is_reported_raw()
    {   capture_logs();
        let c = client(StubTransport::answering(json!({"foo":"bar"})));
        let err = tokio_test::block_on(c.ask("hi")).unwrap_err();
        assert_eq!(err, Error::UnexpectedShape(json!({"foo":"bar"})));
        assert!(logged(r#"ERROR Unexpected response: {"foo":"bar"}"#));
    }

    #[test]
    fn transport_failure_is_a_value()
    {   capture_logs();
        let c = client(StubTransport::failing("connection refused"));
        let err = tokio_test::block_on(c.ask("hi")).unwrap_err();
        assert_eq!(
          err,
          Error::Transport("connection refused".to_string())
        );
        assert!(logged("ERROR Request failed: connection refused"));
    }

    #[test]
    fn request_carries_prompt_verbatim()
    {   let c = client(StubTransport::answering(
          json!({"choices":[{"message":{"content":"ok"}}]})
        ));
        let prompts = ["", "line\nbreak\u{0000}", "ünïcødé 😀"];
        for p in prompts
        {   tokio_test::block_on(c.ask(p)).unwrap();
        }

        let calls = c.transport.calls.lock().unwrap();
        assert_eq!(calls.len(), prompts.len());
        for (call, p) in calls.iter().zip(prompts)
        {   assert_eq!(call.body.messages.len(), 1);
            assert_eq!(call.body.messages[0].role, "user");
            assert_eq!(call.body.messages[0].content, p);
            assert_eq!(call.body.max_tokens, 512);
            assert_eq!(call.body.model, "qwen/qwen3-coder");
        }
    }

    #[tokio::test]
    async fn sequential_calls_share_headers_and_endpoint()
    {   let c = client(StubTransport::answering(
          json!({"choices":[{"message":{"content":"ok"}}]})
        ));
        c.ask("first").await.unwrap();
        c.ask("second").await.unwrap();

        let calls = c.transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].url, calls[1].url);
        assert_eq!(calls[0].url, c.endpoint());
        assert_eq!(
          c.endpoint(),
          "http://gateway.test/api/v1/chat/completions"
        );
        assert_eq!(c.config().model, "qwen/qwen3-coder");
        assert_eq!(calls[0].headers, calls[1].headers);
        assert_eq!(
          calls[0].headers[AUTHORIZATION],
          "Bearer sk-test"
        );
        assert_eq!(
          calls[0].headers[CONTENT_TYPE],
          "application/json"
        );
    }

    #[test]
    fn unusable_key_is_rejected_without_echo()
    {   let config = AskConfig::new(ApiKey::new("bad\nkey"));
        let err = PromptClient::with_transport(
          config,
          StubTransport::failing("unused")
        ).err().unwrap();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(!err.to_string().contains("bad"));
    }
}
