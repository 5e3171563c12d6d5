use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::errors::ProviderError;
use crate::wire::CompletionRequest;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// Chat-completions adapter: one system message, one user message.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    api_base: String,
}

impl OpenAIProvider {
    pub fn new(client: Client, api_key: String, api_base: String) -> Self {
        Self { client, api_key, api_base }
    }
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// Pull the first choice's content out of a successful response body.
fn extract_text(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::malformed(format!("failed to parse OpenAI response: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ProviderError::malformed("OpenAI response contained no message content"))
}

#[async_trait]
impl super::Provider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, model: &str, req: &CompletionRequest) -> Result<String, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.api_base.trim_end_matches('/'));
        let mut body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": req.system },
                { "role": "user", "content": req.prompt }
            ],
        });
        if let Some(t) = req.temperature {
            body["temperature"] = json!(t);
        }

        tracing::debug!(%url, model, "openai: POST chat completion");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "openai: response received");

        if !status.is_success() {
            return Err(super::error_from_response("OpenAI", status.as_u16(), &text));
        }
        extract_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;

    #[test]
    fn extracts_first_choice() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Day 1: temples"}},{"index":1,"message":{"role":"assistant","content":"other"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Day 1: temples");
    }

    #[test]
    fn empty_choices_is_malformed() {
        let err = extract_text(r#"{"choices":[]}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn null_content_is_malformed() {
        let err = extract_text(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn non_json_is_malformed() {
        let err = extract_text("<html>oops</html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }
}
