//! Groq chat-completion driver for Kahovitz.
//!
//! Groq exposes an OpenAI-compatible chat-completion endpoint. The generic
//! [`OpenAICompatibleClient`] speaks that wire format; [`GroqDriver`] binds it
//! to Groq's endpoint and credentials.
//!
//! # Example
//!
//! ```no_run
//! use kahovitz_core::{GenerateRequest, Message};
//! use kahovitz_interface::KahovitzDriver;
//! use kahovitz_models::GroqDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = GroqDriver::new("llama-3.3-70b-versatile")?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = driver.generate(&request).await?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod groq;
mod openai_compat;
mod wire;

pub use groq::{GROQ_CHAT_URL, GroqDriver};
pub use openai_compat::OpenAICompatibleClient;
pub use wire::{
    ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse, ChatMessage,
    Choice, ChoiceMessage, Usage,
};
