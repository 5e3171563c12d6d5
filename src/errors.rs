use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::wire::CompletionFailure;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("configuration error: {0}")] Config(String),
    #[error("invalid trip request: {0}")] InvalidRequest(String),
    #[error("{0}")] Exhausted(CompletionFailure),
}

impl PlannerError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Text suitable for showing to whoever pressed the button.
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config(_) => {
                "The planner is not configured correctly. Check the API key and provider settings.".to_string()
            }
            PlannerError::InvalidRequest(msg) => format!("Invalid trip request: {msg}"),
            PlannerError::Exhausted(failure) if failure.is_quota_limited() => {
                "The AI service is rate limiting requests right now. Please try again shortly.".to_string()
            }
            PlannerError::Exhausted(_) => {
                "None of the configured models could produce an itinerary.".to_string()
            }
        }
    }
}

/// Why a single candidate model failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The backend refused the credential itself. Fatal for the whole run.
    CredentialRejected,
    ModelUnavailable,
    QuotaExceeded,
    MalformedResponse,
    RequestFailed,
}

impl FailureKind {
    /// Map an HTTP status and an optional provider reason code.
    pub fn from_status(status: u16, reason: Option<&str>) -> Self {
        if let Some(r) = reason {
            let r = r.to_ascii_lowercase();
            if r == "api_key_invalid" || r == "invalid_api_key" {
                return FailureKind::CredentialRejected;
            }
        }
        match status {
            429 => FailureKind::QuotaExceeded,
            401 => FailureKind::CredentialRejected,
            403 | 404 => FailureKind::ModelUnavailable,
            _ => FailureKind::RequestFailed,
        }
    }

    /// Heuristic for errors that carry no status code, only a message.
    pub fn from_message(message: &str) -> Self {
        if message.contains("429") {
            FailureKind::QuotaExceeded
        } else {
            FailureKind::RequestFailed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::CredentialRejected => "credential rejected",
            FailureKind::ModelUnavailable => "model unavailable",
            FailureKind::QuotaExceeded => "quota exceeded",
            FailureKind::MalformedResponse => "malformed response",
            FailureKind::RequestFailed => "request failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ProviderError {
    pub fn new<S: Into<String>>(kind: FailureKind, message: S) -> Self {
        Self { kind, status: None, message: message.into() }
    }

    pub fn http<S: Into<String>>(status: u16, reason: Option<&str>, message: S) -> Self {
        Self {
            kind: FailureKind::from_status(status, reason),
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::new(FailureKind::MalformedResponse, message)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        let message = e.to_string();
        if let Some(s) = e.status() {
            return ProviderError::http(s.as_u16(), None, message);
        }
        let kind = if e.is_timeout() || e.is_connect() || e.is_builder() {
            FailureKind::RequestFailed
        } else {
            kind_from_causes(&e)
        };
        ProviderError::new(kind, message)
    }
}

/// Looks only at the causes. The top-level transport message embeds the request
/// URL, and a port or model id containing "429" must not read as a quota error.
fn kind_from_causes(e: &(dyn std::error::Error + 'static)) -> FailureKind {
    let mut cause = e.source();
    while let Some(c) = cause {
        if FailureKind::from_message(&c.to_string()) == FailureKind::QuotaExceeded {
            return FailureKind::QuotaExceeded;
        }
        cause = c.source();
    }
    FailureKind::RequestFailed
}
