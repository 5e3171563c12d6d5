use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{Args, ProviderKind};
use crate::errors::PlannerError;
use crate::prompt::Language;

/// Process-wide settings. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderKind,
    /// Candidate models, highest priority first. Empty means the provider's defaults.
    pub models: Vec<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub api_base: Option<String>,
    /// Prefer the environment variable; this is for local experiments.
    pub api_key: Option<String>,
    pub language: Language,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAI,
            models: Vec::new(),
            temperature: 0.7,
            timeout_secs: 120,
            api_base: None,
            api_key: None,
            language: Language::English,
            log_level: "warn".into(),
        }
    }
}

impl Config {
    /// Missing file means defaults; a file that exists but does not parse is an error.
    pub fn load_from_path(path: Option<PathBuf>) -> Result<Self, PlannerError> {
        let path = path.unwrap_or_else(|| PathBuf::from("trip_planner.toml"));
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    fn from_file(path: &Path) -> Result<Self, PlannerError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| PlannerError::config(format!("cannot read config: {e}")))?;
        toml::from_str(&raw)
            .map_err(|e| PlannerError::config(format!("invalid config {}: {e}", path.display())))
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(p) = args.provider {
            if p != self.provider {
                // Models configured for another backend would never resolve.
                self.models.clear();
            }
            self.provider = p;
        }
        if !args.models.is_empty() {
            self.models = args.models.clone();
        }
        if let Some(t) = args.temperature {
            self.temperature = t;
        }
        if let Some(l) = args.language {
            self.language = l;
        }
        if let Some(s) = args.timeout_secs {
            self.timeout_secs = s;
        }
    }

    pub fn candidate_models(&self) -> Vec<String> {
        if self.models.is_empty() {
            self.provider.default_models()
        } else {
            self.models.clone()
        }
    }

    pub fn api_key(&self) -> Result<String, PlannerError> {
        self.resolve_api_key(|name| std::env::var(name).ok())
    }

    /// Config value first, then the provider's environment variable.
    pub fn resolve_api_key<F>(&self, lookup: F) -> Result<String, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_name = self.provider.api_key_env();
        self.api_key
            .clone()
            .or_else(|| lookup(env_name))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| PlannerError::config(format!("{env_name} is not set")))
    }
}
