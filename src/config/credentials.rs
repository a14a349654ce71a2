use crate::utils::error::{BepError, Result};
use std::env;
use std::fmt;

pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// API key for the generative service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(BepError::ConfigError {
                message: "API key is empty".to_string(),
            });
        }
        Ok(Self(key.trim().to_string()))
    }

    pub fn from_env(var_name: &str) -> Result<Self> {
        let value = env::var(var_name).map_err(|_| BepError::ConfigError {
            message: format!(
                "API key is missing. Please ensure the {} environment variable is set",
                var_name
            ),
        })?;
        Self::new(value).map_err(|_| BepError::ConfigError {
            message: format!("{} environment variable is set but empty", var_name),
        })
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_config_error() {
        assert!(matches!(ApiKey::new("  "), Err(BepError::ConfigError { .. })));
        assert_eq!(ApiKey::new(" abc ").unwrap().expose(), "abc");
    }

    #[test]
    fn test_missing_env_var_is_config_error() {
        let err = ApiKey::from_env("BEP_ASSISTANT_TEST_UNSET_KEY").unwrap_err();
        assert!(matches!(err, BepError::ConfigError { .. }));
        assert!(err.to_string().contains("BEP_ASSISTANT_TEST_UNSET_KEY"));
    }

    #[test]
    fn test_from_env_reads_key() {
        std::env::set_var("BEP_ASSISTANT_TEST_KEY", "secret-value");
        let key = ApiKey::from_env("BEP_ASSISTANT_TEST_KEY").unwrap();
        assert_eq!(key.expose(), "secret-value");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        std::env::remove_var("BEP_ASSISTANT_TEST_KEY");
    }
}
