//! Wire types for the chat-completions exchange

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output bound sent with every request
pub const MAX_TOKENS: usize = 512;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub max_tokens: usize
}

impl ChatRequest
{   /// Single user turn carrying `prompt` verbatim
    pub fn user_prompt(
      model: impl Into<String>
    , prompt: impl Into<String>
    ) -> Self
    {   ChatRequest
        {   model: model.into()
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: prompt.into()
              }
            ]
          , max_tokens: MAX_TOKENS
        }
    }
}

/// What a response body turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply
{   Success(String)
  , RemoteError(String)
  , Unrecognized(Value)
}

impl ChatReply
{   /// Classify a parsed body. `choices` wins over `error`.
    pub fn decode(body: Value) -> Self
    {   if !body.is_object()
        {   return ChatReply::Unrecognized(body);
        }

        if let Some(choices) = body.get("choices")
        {   let content = choices
              .get(0)
              .and_then(|c| c.get("message"))
              .and_then(|m| m.get("content"))
              .and_then(Value::as_str)
              .map(str::to_string);
            return match content
            {   Some(text) => ChatReply::Success(text)
              , None => ChatReply::Unrecognized(body)
            };
        }

        if let Some(error) = body.get("error")
        {   let message = match error
              .get("message")
              .and_then(Value::as_str)
            {   Some(msg) => msg.to_string()
              , None => error.to_string()
            };
            return ChatReply::RemoteError(message);
        }

        ChatReply::Unrecognized(body)
    }
}
