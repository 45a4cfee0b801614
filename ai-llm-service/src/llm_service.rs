//! Process-wide text generation service.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Builds exactly one provider client (Gemini or OpenAI) at startup and
//!   reuses its HTTP connection pool for every request.
//! - Without a credential no client is built; every call fails fast with
//!   [`ConfigError::MissingVar`] and never touches the network.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmService, TextGenerator, config_from_env};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc: Arc<dyn TextGenerator> = Arc::new(LlmService::new(config_from_env()?)?);
//! let text = svc.generate("Explain borrowing in one sentence.").await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError},
    services::{gemini_service::GeminiService, open_ai_service::OpenAiService},
};

/// Anything that turns a prompt into a completion.
///
/// The HTTP layer depends on this trait rather than on [`LlmService`] so the
/// provider can be swapped for a test double.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` to the model and returns the trimmed answer text.
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError>;
}

enum Backend {
    Gemini(GeminiService),
    OpenAI(OpenAiService),
}

/// Single-provider LLM service.
pub struct LlmService {
    cfg: LlmModelConfig,
    backend: Option<Backend>,
}

impl LlmService {
    /// Creates the service and, when a credential is configured, its provider client.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] if the model name is blank
    /// - provider client construction errors (invalid endpoint, TLS init)
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let backend = if cfg.has_api_key() {
            Some(match cfg.provider {
                LlmProvider::Gemini => Backend::Gemini(GeminiService::new(cfg.clone())?),
                LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg.clone())?),
            })
        } else {
            warn!(
                provider = %cfg.provider,
                var = cfg.provider.api_key_var(),
                "no credential configured; generation requests will be rejected"
            );
            None
        };

        Ok(Self { cfg, backend })
    }

    /// The active config.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let Some(backend) = &self.backend else {
            return Err(ConfigError::MissingVar(self.cfg.provider.api_key_var()).into());
        };

        debug!(provider = %self.cfg.provider, prompt_len = prompt.len(), "generating");
        match backend {
            Backend::Gemini(cli) => cli.generate(prompt).await,
            Backend::OpenAI(cli) => cli.generate(prompt).await,
        }
    }
}
