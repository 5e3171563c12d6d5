use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::Provider;
use crate::errors::ProviderError;
use crate::wire::CompletionRequest;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

pub struct Gemini {
    client: Client,
    api_key: String,
    api_base: String,
}

impl Gemini {
    pub fn new(client: Client, api_key: String, api_base: String) -> Self {
        Self { client, api_key, api_base }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<PartIn<'a>>,
}

#[derive(Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentOut>,
}

#[derive(Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Deserialize)]
struct PartOut {
    #[serde(default)]
    text: String,
}

fn build_body(req: &CompletionRequest) -> GenerateRequest<'_> {
    GenerateRequest {
        system_instruction: Content { role: None, parts: vec![PartIn { text: &req.system }] },
        contents: vec![Content { role: Some("user"), parts: vec![PartIn { text: &req.prompt }] }],
        generation_config: req.temperature.map(|temperature| GenerationConfig { temperature }),
    }
}

fn extract_text(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::malformed(format!("gemini response parse error: {e}")))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::malformed("gemini: empty content"));
    }
    Ok(text)
}

#[async_trait]
impl Provider for Gemini {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, model: &str, req: &CompletionRequest) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model
        );
        tracing::debug!(%url, "gemini: POST generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_body(req))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "gemini: response received");

        if !status.is_success() {
            return Err(super::error_from_response("Gemini", status.as_u16(), &text));
        }
        extract_text(&text)
    }
}
