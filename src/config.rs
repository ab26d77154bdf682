//! Configuration for the prompt client

use std::fmt;
use log::debug;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const BASE_URL_VAR: &str = "OPENROUTER_BASE_URL";
pub const MODEL_VAR: &str = "OPENROUTER_MODEL";

pub const DEFAULT_BASE_URL: &str
  = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "qwen/qwen3-coder";

/// Bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey
{   pub fn new(key: impl Into<String>) -> Self
    {   ApiKey(key.into())
    }

    pub fn expose(&self) -> &str
    {   &self.0
    }
}

impl fmt::Debug for ApiKey
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str("[REDACTED]")
    }
}

/// Client configuration, fixed for the process lifetime
#[derive(Debug, Clone)]
pub struct AskConfig
{   /// Credential sent as a bearer token
    pub api_key: ApiKey
  , /// API base URL, without the chat-completions path
    pub base_url: String
  , /// Model identifier
    pub model: String
}

impl AskConfig
{   pub fn new(api_key: ApiKey) -> Self
    {   AskConfig
        {   api_key
          , base_url: DEFAULT_BASE_URL.to_string()
          , model: DEFAULT_MODEL.to_string()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>)
      -> Self
    {   self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self
    {   self.model = model.into();
        self
    }

    /// Full chat-completions URL
    pub fn endpoint(&self) -> String
    {   format!(
          "{}/chat/completions",
          self.base_url.trim_end_matches('/')
        )
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let get = |name: &str| {
          lookup(name).filter(|v| !v.trim().is_empty())
        };

        let key = get(API_KEY_VAR).ok_or_else(|| {
          crate::error::Error::MissingApiKey(
            API_KEY_VAR.to_string()
          )
        })?;

        let mut config = AskConfig::new(ApiKey::new(key));
        if let Some(base_url) = get(BASE_URL_VAR)
        {   config = config.with_base_url(base_url);
        }
        if let Some(model) = get(MODEL_VAR)
        {   config = config.with_model(model);
        }

        debug!(
          "Loaded config: endpoint={} model={}",
          config.endpoint(), config.model
        );
        Ok(config)
    }
}
