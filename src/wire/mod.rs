use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::FailureKind;

/// What a provider adapter receives for a single attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub text: String,
    pub model_used: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptError {
    pub model: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Every candidate failed. `errors` is in attempted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionFailure {
    pub attempted_models: Vec<String>,
    pub errors: Vec<AttemptError>,
}

impl CompletionFailure {
    pub fn is_quota_limited(&self) -> bool {
        self.errors.iter().any(|e| e.kind == FailureKind::QuotaExceeded)
    }
}

impl fmt::Display for CompletionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all {} candidate model(s) failed", self.attempted_models.len())?;
        for e in &self.errors {
            write!(f, "; {} ({}): {}", e.model, e.kind, e.message)?;
        }
        Ok(())
    }
}
