//! LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_PROVIDER`     = `gemini` (default) or `openai`
//! - `GOOGLE_API_KEY`   = Gemini credential (read when provider is Gemini)
//! - `OPENAI_API_KEY`   = OpenAI credential (read when provider is OpenAI)
//! - `LLM_MODEL`        = model id (provider default otherwise)
//! - `LLM_ENDPOINT`     = base URL (provider default otherwise)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = optional temperature (0.0..=2.0)
//! - `LLM_TOP_P`        = optional nucleus sampling cutoff (0.0..=1.0)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 60)
//!
//! A missing credential is **not** an error here: the server starts and the
//! first generation request reports it. Malformed values are rejected up front.

use tracing::{info, warn};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, opt_f32, opt_u32, opt_u64, opt_var, validate_http_endpoint,
        validate_range_f32,
    },
};

/// Builds the process-wide config from `std::env`.
///
/// # Errors
/// See [`config_from_lookup`].
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Builds the config from an arbitrary variable source.
///
/// # Errors
///
/// - [`ConfigError::UnsupportedProvider`](crate::ConfigError::UnsupportedProvider) for an unknown `LLM_PROVIDER`
/// - [`ConfigError::InvalidNumber`](crate::ConfigError::InvalidNumber) for unparsable numeric knobs
/// - [`ConfigError::InvalidFormat`](crate::ConfigError::InvalidFormat) if `LLM_ENDPOINT` lacks http/https
/// - [`ConfigError::OutOfRange`](crate::ConfigError::OutOfRange) for a temperature outside `0.0..=2.0`
///   or a top_p outside `0.0..=1.0`
pub fn config_from_lookup<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = match opt_var(&lookup, "LLM_PROVIDER") {
        Some(raw) => raw.parse::<LlmProvider>()?,
        None => LlmProvider::default(),
    };

    let mut cfg = LlmModelConfig::for_provider(provider);

    if let Some(model) = opt_var(&lookup, "LLM_MODEL") {
        cfg.model = model;
    }
    if let Some(endpoint) = opt_var(&lookup, "LLM_ENDPOINT") {
        validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;
        cfg.endpoint = endpoint;
    }

    cfg.api_key = opt_var(&lookup, provider.api_key_var());
    cfg.max_tokens = opt_u32(&lookup, "LLM_MAX_TOKENS")?;
    cfg.temperature = opt_f32(&lookup, "LLM_TEMPERATURE")?;
    if let Some(t) = cfg.temperature {
        validate_range_f32("temperature", "expected 0.0..=2.0", t, 0.0, 2.0)?;
    }
    cfg.top_p = opt_f32(&lookup, "LLM_TOP_P")?;
    if let Some(p) = cfg.top_p {
        validate_range_f32("top_p", "expected 0.0..=1.0", p, 0.0, 1.0)?;
    }
    cfg.timeout_secs = opt_u64(&lookup, "LLM_TIMEOUT_SECS")?;

    if cfg.has_api_key() {
        info!(%provider, model = %cfg.model, endpoint = %cfg.endpoint, "LLM config loaded");
    } else {
        warn!(
            %provider,
            var = provider.api_key_var(),
            "LLM credential not set; /ask requests will fail until it is configured"
        );
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error_handler::ConfigError;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_to_gemini_without_key() {
        let cfg = config_from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.provider, LlmProvider::Gemini);
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.endpoint, "https://generativelanguage.googleapis.com");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn reads_key_for_selected_provider_only() {
        let cfg = config_from_lookup(lookup(&[
            ("LLM_PROVIDER", "openai"),
            ("GOOGLE_API_KEY", "g-key"),
            ("OPENAI_API_KEY", "sk-key"),
        ]))
        .unwrap();
        assert_eq!(cfg.provider, LlmProvider::OpenAI);
        assert_eq!(cfg.api_key.as_deref(), Some("sk-key"));
        assert_eq!(cfg.model, "gpt-4o-mini");
    }

    #[test]
    fn overrides_model_endpoint_and_knobs() {
        let cfg = config_from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "g-key"),
            ("LLM_MODEL", "gemini-2.0-flash"),
            ("LLM_ENDPOINT", "http://localhost:9999"),
            ("LLM_MAX_TOKENS", "512"),
            ("LLM_TEMPERATURE", "0.3"),
            ("LLM_TOP_P", "0.9"),
            ("LLM_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(cfg.model, "gemini-2.0-flash");
        assert_eq!(cfg.endpoint, "http://localhost:9999");
        assert_eq!(cfg.max_tokens, Some(512));
        assert_eq!(cfg.temperature, Some(0.3));
        assert_eq!(cfg.top_p, Some(0.9));
        assert_eq!(cfg.timeout_secs, Some(15));
    }

    #[test]
    fn rejects_malformed_values() {
        let err = config_from_lookup(lookup(&[("LLM_PROVIDER", "bard")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::UnsupportedProvider(_))
        ));

        let err = config_from_lookup(lookup(&[("LLM_ENDPOINT", "localhost")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidFormat { var: "LLM_ENDPOINT", .. })
        ));

        let err = config_from_lookup(lookup(&[("LLM_TEMPERATURE", "3.5")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::OutOfRange { field: "temperature", .. })
        ));

        let err = config_from_lookup(lookup(&[("LLM_TOP_P", "1.5")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::OutOfRange { field: "top_p", .. })
        ));

        let err = config_from_lookup(lookup(&[("LLM_MAX_TOKENS", "-1")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidNumber { var: "LLM_MAX_TOKENS", .. })
        ));
    }
}
