use tracing::{info, warn};

use crate::errors::{FailureKind, PlannerError};
use crate::prompt::PromptText;
use crate::provider::DynProvider;
use crate::wire::{AttemptError, CompletionFailure, CompletionRequest, CompletionResult};

/// Ordered single-pass fallback over candidate models.
///
/// Each candidate gets exactly one request. The first success wins; a rejected
/// credential stops the run; every other failure is recorded and the next
/// candidate is tried. Holds nothing mutable, so one fetcher can serve
/// concurrent callers.
pub struct CompletionFetcher {
    provider: DynProvider,
    models: Vec<String>,
    temperature: Option<f32>,
}

impl CompletionFetcher {
    pub fn new(
        provider: DynProvider,
        models: Vec<String>,
        temperature: Option<f32>,
    ) -> Result<Self, PlannerError> {
        if models.is_empty() {
            return Err(PlannerError::config("no candidate models configured"));
        }
        Ok(Self { provider, models, temperature })
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub async fn fetch(&self, prompt: &PromptText, system: &str) -> Result<CompletionResult, PlannerError> {
        let req = CompletionRequest {
            system: system.to_string(),
            prompt: prompt.as_str().to_string(),
            temperature: self.temperature,
        };

        let mut attempted = Vec::with_capacity(self.models.len());
        let mut errors = Vec::new();

        for model in &self.models {
            attempted.push(model.clone());
            info!(provider = self.provider.name(), model = %model, "requesting completion");

            match self.provider.complete(model, &req).await {
                Ok(text) => {
                    info!(model = %model, chars = text.len(), "completion succeeded");
                    return Ok(CompletionResult { text, model_used: model.clone() });
                }
                Err(e) if e.kind == FailureKind::CredentialRejected => {
                    warn!(model = %model, error = %e, "credential rejected; aborting");
                    return Err(PlannerError::config(format!(
                        "{} rejected the API key: {}",
                        self.provider.name(),
                        e.message
                    )));
                }
                Err(e) => {
                    warn!(model = %model, kind = %e.kind, status = ?e.status, error = %e.message, "candidate failed");
                    errors.push(AttemptError {
                        model: model.clone(),
                        kind: e.kind,
                        message: e.message,
                    });
                }
            }
        }

        Err(PlannerError::Exhausted(CompletionFailure { attempted_models: attempted, errors }))
    }
}
