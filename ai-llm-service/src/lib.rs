//! Shared LLM client for the learning assistant.
//!
//! One provider is selected per process ([`LlmProvider::Gemini`] or
//! [`LlmProvider::OpenAI`]). Build an [`LlmModelConfig`] once at startup with
//! [`config_from_env`], wrap an [`LlmService`] in `Arc`, and call it through
//! the [`TextGenerator`] trait.

pub mod config;
pub mod error_handler;
pub mod llm_service;
pub mod services;
pub mod telemetry;

pub use config::{
    default_config::{config_from_env, config_from_lookup},
    llm_model_config::LlmModelConfig,
    llm_provider::LlmProvider,
};
pub use error_handler::{
    AiLlmError, ConfigError, HttpError, ProviderError, ProviderErrorKind, error_chain,
};
pub use llm_service::{LlmService, TextGenerator};
