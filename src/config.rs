use crate::error::{EnricherError, Result};
use crate::llm::types::GenerationSettings;

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "REPORT_ENRICHER_MODEL";

/// Sampling settings for each kind of request the pipelines issue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestProfiles {
    pub single_translation: GenerationSettings,
    pub batch_translation: GenerationSettings,
    pub insight_synthesis: GenerationSettings,
    pub insight_translation: GenerationSettings,
}

impl Default for RequestProfiles {
    fn default() -> Self {
        Self {
            single_translation: GenerationSettings::new(0.1, 2000),
            batch_translation: GenerationSettings::new(0.1, 8000),
            insight_synthesis: GenerationSettings::new(0.3, 8000),
            insight_translation: GenerationSettings::new(0.1, 8000),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnricherConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub profiles: RequestProfiles,
}

impl EnricherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            profiles: RequestProfiles::default(),
        }
    }

    /// Reads the configuration from process environment variables.
    /// Callers load `.env` beforehand if they want it honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| EnricherError::Config(format!("{} must be set", ENV_API_KEY)))?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let result = EnricherConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(EnricherError::Config(_))));

        let blank = EnricherConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "  ")]));
        assert!(blank.is_err());
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = EnricherConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "sk-test")])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profiles.insight_synthesis.temperature, 0.3);
        assert_eq!(config.profiles.single_translation.max_tokens, 2000);

        let config = EnricherConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_MODEL, "gpt-4o"),
            (ENV_BASE_URL, "http://localhost:11434/v1"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
    }
}
