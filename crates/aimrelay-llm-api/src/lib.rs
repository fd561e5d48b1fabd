//! # aimrelay-llm-api
//!
//! Adapters for the upstream chat-completion providers the relay forwards to:
//! - Perplexity (reasoning tags rewritten, upstream status passed through)
//! - DeepSeek
//! - Grok (xAI)
//! - OpenAI
//!
//! ## Example
//!
//! ```rust,no_run
//! use aimrelay_llm_api::{BackendType, ProviderFactory, ProviderSettings};
//! use aimrelay_types::Message;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = ProviderFactory::create(
//!         BackendType::DeepSeek,
//!         &ProviderSettings::with_api_key("your-api-key"),
//!     )?;
//!
//!     let reply = provider
//!         .complete(vec![Message::user("Hello!")], "deepseek-chat")
//!         .await?;
//!     println!("Response: {}", reply.text);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;


// Re-export commonly used types
pub use client::{
    openai_compat::OpenAiCompatProvider,
    perplexity::{rewrite_reasoning_tags, PerplexityProvider},
    ChatProvider,
};

pub use config::{
    chat_completions_url, mask_key, BackendType, ProviderFactory, ProviderSettings,
    DEEPSEEK_API_URL, OPENAI_API_URL, PERPLEXITY_API_URL, XAI_API_URL,
};

pub use error::ProviderError;
