//! FinAI LLM - Provider abstraction for the financial advisor
//!
//! One interface over the chat-completion services FinAI can talk to:
//!
//! ## Cloud Providers
//! - Groq (default): `https://api.groq.com/openai/v1`, needs an API key
//!
//! ## Local / Self-hosted Providers
//! - OpenAI-compatible: vLLM, llama.cpp, LM Studio, OpenAI itself
//! - Ollama: `http://localhost:11434`
//!
//! ## Demo mode
//!
//! The router can also be configured with no provider at all
//! ([`ProviderKind::Simulation`]). Callers check [`LLMRouter::is_simulated`]
//! and fabricate their answer locally instead of calling out.

pub mod providers;
pub mod router;
pub mod types;

pub use providers::*;
pub use router::*;
pub use types::*;
