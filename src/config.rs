use std::time::Duration;

use thiserror::Error;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_ENDPOINT: &str = "GEMINI_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";

/// Errors in the narrative-service environment.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not set; the AI analysis needs an API key")]
    MissingApiKey { key: &'static str },
    #[error("{key} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
}

/// Settings for the external text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl NarrativeConfig {
    pub fn default() -> Self {
        NarrativeConfig {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();
        cfg.api_key = get(ENV_API_KEY);
        if let Some(model) = get(ENV_MODEL) {
            cfg.model = model;
        }
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            cfg.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey { key: ENV_API_KEY })
    }

    pub fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
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
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let cfg = NarrativeConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, NarrativeConfig::default());
        assert_eq!(
            cfg.require_api_key(),
            Err(ConfigError::MissingApiKey { key: ENV_API_KEY })
        );
    }

    #[test]
    fn test_overrides_from_env() {
        let cfg = NarrativeConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "k-123"),
            (ENV_MODEL, "gemini-pro"),
            (ENV_ENDPOINT, "http://localhost:8080/v1/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.require_api_key(), Ok("k-123"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(
            cfg.generate_url(),
            "http://localhost:8080/v1/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let cfg = NarrativeConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "  ")])).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = NarrativeConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }
}
