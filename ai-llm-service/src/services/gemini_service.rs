//! Google Gemini service for text generation.
//!
//! Minimal, non-streaming client around the Generative Language REST API:
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! The credential travels in the `x-goog-api-key` header so it never ends up
//! in URLs that get logged.
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Gemini`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://

use std::time::Instant;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, ProviderError, ProviderErrorKind, error_chain, make_snippet,
    },
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Thin client for the Gemini `generateContent` API.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Gemini
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(provider_err(ProviderErrorKind::InvalidProvider));
        }

        let api_key = cfg
            .api_key
            .clone()
            .ok_or_else(|| provider_err(ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(provider_err(ProviderErrorKind::InvalidEndpoint(
                cfg.endpoint.clone(),
            )));
        }

        let mut key_value = header::HeaderValue::from_str(&api_key).map_err(|e| {
            provider_err(ProviderErrorKind::Decode(format!(
                "invalid API key header: {e}"
            )))
        })?;
        key_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_generate = format!("{base}/v1beta/models/{}:generateContent", cfg.model);

        info!(
            provider = %cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout().as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Sends `prompt` as a single user turn and returns the trimmed answer.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::Provider`] with `Transport` for connect/TLS/timeout failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyChoices` if no text came back
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let cause = error_chain(&e);
                error!(
                    error = %cause,
                    latency_ms = started.elapsed().as_millis(),
                    "request to {} failed",
                    self.url_generate
                );
                provider_err(ProviderErrorKind::Transport(cause))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(provider_err(ProviderErrorKind::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })));
        }

        let out: GenerateContentResponse = resp.json().await.map_err(|e| {
            error!(
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode generateContent response"
            );
            provider_err(ProviderErrorKind::Decode(format!(
                "serde error: {e}; expected `candidates[0].content.parts[].text`"
            )))
        })?;

        let text = extract_text(out).map_err(provider_err)?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            answer_len = text.len(),
            "Gemini generation completed"
        );

        Ok(text)
    }
}

fn provider_err(kind: ProviderErrorKind) -> AiLlmError {
    ProviderError::new(LlmProvider::Gemini, kind).into()
}

/// Concatenates the text parts of the first candidate that has any.
fn extract_text(resp: GenerateContentResponse) -> Result<String, ProviderErrorKind> {
    resp.candidates
        .into_iter()
        .filter_map(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .ok_or(ProviderErrorKind::EmptyChoices)
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        let generation_config = GenerationConfig {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_output_tokens: cfg.max_tokens,
        };
        let has_knobs = generation_config.temperature.is_some()
            || generation_config.top_p.is_some()
            || generation_config.max_output_tokens.is_some();

        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: has_knobs.then_some(generation_config),
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::test_server::serve_once;

    fn cfg_with_key() -> LlmModelConfig {
        let mut cfg = LlmModelConfig::for_provider(LlmProvider::Gemini);
        cfg.api_key = Some("g-key".into());
        cfg
    }

    #[test]
    fn extracts_and_trims_first_candidate_text() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "  Rust is " }, { "text": "great.\n" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }))
        .unwrap();
        assert_eq!(extract_text(resp).unwrap(), "Rust is great.");
    }

    #[test]
    fn empty_candidates_are_an_error() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert!(matches!(
            extract_text(resp),
            Err(ProviderErrorKind::EmptyChoices)
        ));
    }

    #[test]
    fn request_body_uses_camel_case_and_skips_unset_knobs() {
        let mut cfg = cfg_with_key();
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&cfg, "hi")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert!(body.get("generationConfig").is_none());

        cfg.max_tokens = Some(128);
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&cfg, "hi")).unwrap();
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 128);
    }

    #[test]
    fn constructor_validates_provider_and_key() {
        let mut cfg = cfg_with_key();
        cfg.provider = LlmProvider::OpenAI;
        assert!(GeminiService::new(cfg).is_err());

        let mut cfg = cfg_with_key();
        cfg.api_key = None;
        let err = GeminiService::new(cfg).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError { kind: ProviderErrorKind::MissingApiKey, .. })
        ));

        let svc = GeminiService::new(cfg_with_key()).unwrap();
        assert_eq!(
            svc.url_generate,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    fn cfg_for(base: &str) -> LlmModelConfig {
        let mut cfg = cfg_with_key();
        cfg.endpoint = base.to_string();
        cfg.timeout_secs = Some(5);
        cfg
    }

    #[tokio::test]
    async fn generate_sends_key_header_and_decodes_answer() {
        let (base, server) = serve_once(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"  Borrow, don't own.\n"}]}}]}"#,
        )
        .await;
        let svc = GeminiService::new(cfg_for(&base)).unwrap();

        let answer = svc.generate("What is borrowing?").await.unwrap();
        assert_eq!(answer, "Borrow, don't own.");

        let req = server.await.unwrap();
        assert!(req
            .head
            .starts_with("POST /v1beta/models/gemini-1.5-flash:generateContent "));
        assert_eq!(req.header("x-goog-api-key"), Some("g-key"));
        assert!(!req.head.contains("key=g-key"));
        let sent: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(sent["contents"][0]["parts"][0]["text"], "What is borrowing?");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_status() {
        let (base, server) = serve_once(
            401,
            r#"{"error": {"code": 401,
                "message": "API key not valid"}}"#,
        )
        .await;
        let svc = GeminiService::new(cfg_for(&base)).unwrap();

        let err = svc.generate("hi").await.unwrap_err();
        server.await.unwrap();

        match err {
            AiLlmError::Provider(ProviderError {
                provider: LlmProvider::Gemini,
                kind: ProviderErrorKind::HttpStatus(http),
            }) => {
                assert_eq!(http.status, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(
                    http.url,
                    format!("{base}/v1beta/models/gemini-1.5-flash:generateContent")
                );
                assert_eq!(
                    http.snippet,
                    r#"{"error": {"code": 401, "message": "API key not valid"}}"#
                );
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_decode_error() {
        let (base, server) = serve_once(200, "not json").await;
        let svc = GeminiService::new(cfg_for(&base)).unwrap();

        let err = svc.generate("hi").await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError { kind: ProviderErrorKind::Decode(_), .. })
        ));
    }
}
