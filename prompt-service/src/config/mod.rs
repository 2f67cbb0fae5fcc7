use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4-turbo-preview";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// Name of the variable holding the provider API key.
pub const API_KEY_VAR: &str = "OPENAI_KEY";

#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Provider API key. `None` keeps the service up, but every prompt
    /// route then answers 500.
    pub api_key: Option<Secret<String>>,
    /// Base URL the `/chat/completions` and `/images/generations` paths hang off.
    pub api_base_url: String,
    pub chat_model: String,
    pub image_size: String,
    /// Outbound request timeout. `None` waits for the provider indefinitely.
    pub request_timeout: Option<Duration>,
    /// Largest accepted `/text` or `/image` body. `None` accepts any size.
    pub max_body_bytes: Option<usize>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            request_timeout: None,
            max_body_bytes: None,
        }
    }
}

impl PromptConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let request_timeout = match env::var("OPENAI_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "OPENAI_REQUEST_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?)),
            Err(_) => None,
        };

        let max_body_bytes = match env::var("PROMPT_MAX_BODY_BYTES") {
            Ok(raw) => Some(raw.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "PROMPT_MAX_BODY_BYTES must be a whole number of bytes: {}",
                    e
                ))
            })?),
            Err(_) => None,
        };

        Ok(PromptConfig {
            common,
            openai: OpenAiConfig {
                api_key: env::var(API_KEY_VAR).ok().map(Secret::new),
                api_base_url: get_env("OPENAI_API_BASE_URL", Some(DEFAULT_API_BASE_URL), is_prod)?,
                chat_model: get_env("OPENAI_CHAT_MODEL", Some(DEFAULT_CHAT_MODEL), is_prod)?,
                image_size: get_env("OPENAI_IMAGE_SIZE", Some(DEFAULT_IMAGE_SIZE), is_prod)?,
                request_timeout,
                max_body_bytes,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        Err(_) => default.map(str::to_string).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_openai_config_targets_public_api() {
        let config = OpenAiConfig::default();

        assert!(config.api_key.is_none());
        assert_eq!(config.api_base_url, "https://api.openai.com/v1");
        assert_eq!(config.chat_model, "gpt-4-turbo-preview");
        assert_eq!(config.image_size, "1024x1024");
        assert!(config.request_timeout.is_none());
        assert!(config.max_body_bytes.is_none());
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let config = OpenAiConfig {
            api_key: Some(Secret::new("sk-very-secret".to_string())),
            ..OpenAiConfig::default()
        };

        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }

    #[test]
    fn missing_variable_uses_default_outside_production() {
        let value = get_env("PROMPT_SERVICE_TEST_UNSET_VARIABLE", Some("fallback"), false).unwrap();

        assert_eq!(value, "fallback");
    }

    #[test]
    fn missing_variable_is_config_error_in_production() {
        let err = get_env("PROMPT_SERVICE_TEST_UNSET_VARIABLE", Some("fallback"), true).unwrap_err();

        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
