use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::cli::ProviderKind;
use crate::errors::{PlannerError, ProviderError};
use crate::wire::CompletionRequest;

pub mod gemini;
pub mod openai;

#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    /// One request against one model. Returns the generated text.
    async fn complete(&self, model: &str, req: &CompletionRequest) -> Result<String, ProviderError>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(
    kind: ProviderKind,
    api_key: String,
    api_base: Option<String>,
    timeout_secs: u64,
) -> Result<DynProvider, PlannerError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PlannerError::config(format!("failed to build HTTP client: {e}")))?;

    match kind {
        ProviderKind::OpenAI => Ok(Box::new(openai::OpenAIProvider::new(
            client,
            api_key,
            api_base.unwrap_or_else(|| openai::DEFAULT_API_BASE.to_string()),
        ))),
        ProviderKind::Gemini => Ok(Box::new(gemini::Gemini::new(
            client,
            api_key,
            api_base.unwrap_or_else(|| gemini::DEFAULT_API_BASE.to_string()),
        ))),
    }
}

/// Error envelope shared by both backends: `{"error": {...}}`.
#[derive(Deserialize, Debug, Default)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ApiError,
}

#[derive(Deserialize, Debug, Default)]
struct ApiError {
    #[serde(default)]
    message: String,
    /// OpenAI puts a string here, Gemini a number.
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize, Debug, Default)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

impl ApiError {
    fn reason(&self) -> Option<&str> {
        if let Some(r) = self.details.iter().find_map(|d| d.reason.as_deref()) {
            return Some(r);
        }
        match &self.code {
            Some(serde_json::Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Turn a non-success HTTP response into a classified error.
pub(crate) fn error_from_response(provider: &str, status: u16, body: &str) -> ProviderError {
    let parsed: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let api = parsed.error;
    let detail = if api.message.is_empty() { body.trim().to_string() } else { api.message.clone() };
    let message = match &api.status {
        Some(s) => format!("{provider} API error ({status} {s}): {detail}"),
        None => format!("{provider} API error ({status}): {detail}"),
    };
    ProviderError::http(status, api.reason(), message)
}
