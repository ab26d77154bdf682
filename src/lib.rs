pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod client;

/*

askrouter: send one prompt to an OpenAI-compatible chat-completions
gateway (OpenRouter by default) and hand back the reply text.

askrouter/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports
│   ├── main.rs         # Interactive entry point
│   ├── error.rs        # Error taxonomy
│   ├── config.rs       # Credential, endpoint and model
│   ├── client.rs       # PromptClient::ask
│   ├── request.rs      # Wire request and decoded reply
│   └── providers/
│       ├── mod.rs      # Transport trait
│       └── openrouter.rs
└── tests/              # wiremock-backed and live tests

*/

pub use client::PromptClient;
pub use config::{ApiKey, AskConfig};
pub use error::Error;
pub use request::{ChatReply, ChatRequest, MAX_TOKENS};
