//! Relay configuration.

use std::env;

use thiserror::Error;

use crate::model::ModelConfig;
use crate::model::config::DEFAULT_MAX_OUTPUT_TOKENS;
use crate::model::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY not found in environment variables.")]
    MissingApiKey,

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Process-wide configuration for the external model.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Gemini API key.
    pub api_key: String,
    /// Model identifier, e.g. `gemini-2.5-pro-exp-03-25`.
    pub model: String,
    /// Gemini REST base URL.
    pub base_url: String,
    /// Generation parameters and safety thresholds.
    pub model_config: ModelConfig,
}

impl RelayConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable              | Default                                       |
    /// |-----------------------|-----------------------------------------------|
    /// | `GEMINI_API_KEY`      | required                                      |
    /// | `GEMINI_MODEL`        | `gemini-2.5-pro-exp-03-25`                    |
    /// | `GEMINI_API_BASE_URL` | `https://generativelanguage.googleapis.com`   |
    /// | `MAX_OUTPUT_TOKENS`   | `2048`                                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`RelayConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let max_output_tokens = match lookup("MAX_OUTPUT_TOKENS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "MAX_OUTPUT_TOKENS",
                    value: raw,
                })?,
            None => DEFAULT_MAX_OUTPUT_TOKENS,
        };

        Ok(Self {
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            base_url: lookup("GEMINI_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            model_config: ModelConfig::default().with_max_output_tokens(max_output_tokens),
        })
    }

    /// Builds the Gemini client described by this configuration.
    pub fn gemini_client(&self) -> GeminiClient {
        GeminiClient::new(self.api_key.clone())
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = RelayConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn blank_api_key_is_fatal() {
        let err = RelayConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn defaults_apply() {
        let config = RelayConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")]))
            .expect("config");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model_config, ModelConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-1.5-flash-latest"),
            ("GEMINI_API_BASE_URL", "http://127.0.0.1:8080"),
            ("MAX_OUTPUT_TOKENS", "5000"),
        ]))
        .expect("config");
        assert_eq!(config.model, "gemini-1.5-flash-latest");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.model_config.generation_config.max_output_tokens, 5000);
        assert_eq!(config.gemini_client().model(), "gemini-1.5-flash-latest");
    }

    #[test]
    fn invalid_max_output_tokens_is_rejected() {
        let err = RelayConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("MAX_OUTPUT_TOKENS", "lots"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "MAX_OUTPUT_TOKENS",
                value: "lots".into()
            }
        );
    }
}
