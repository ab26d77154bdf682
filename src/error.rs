use std::fmt;

/// Error type for askrouter operations
/// Implements Clone so tests can hold on to what a call returned
#[derive(Debug, Clone, PartialEq)]
pub enum Error
{   /// HTTP exchange did not complete, or the body was not JSON
    Transport(String)
  , /// Service answered with an error descriptor
    Remote(String)
  , /// Body carried neither choices nor an error
    UnexpectedShape(serde_json::Value)
  , /// Required environment variable is absent
    MissingApiKey(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Transport(msg) => {
              write!(f, "Request failed: {}", msg)
            }
          , Error::Remote(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::UnexpectedShape(raw) => {
              write!(f, "Unexpected response: {}", raw)
            }
          , Error::MissingApiKey(var) => {
              write!(f, "Missing API key: {} is not set", var)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   Error::Transport(e.to_string())
    }
}
