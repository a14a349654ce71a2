use crate::adapters::gemini::DEFAULT_ENDPOINT;
use crate::config::credentials::DEFAULT_API_KEY_ENV;
use crate::core::client::{DEFAULT_COMPARISON_MODEL, DEFAULT_GENERATION_MODEL};
use crate::core::export::ExportFormat;
use crate::domain::ports::BackendSettings;
use crate::utils::error::{BepError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Unset means no client-side timeout.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_generation_model")]
    pub generation: String,
    #[serde(default = "default_comparison_model")]
    pub comparison: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,
    /// `md` or `doc`
    pub format: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_generation_model() -> String {
    DEFAULT_GENERATION_MODEL.to_string()
}

fn default_comparison_model() -> String {
    DEFAULT_COMPARISON_MODEL.to_string()
}

fn default_output_directory() -> String {
    "./output".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_seconds: None,
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            generation: default_generation_model(),
            comparison: default_comparison_model(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            format: None,
        }
    }
}

impl TomlConfig {
    /// Loads and parses a TOML config file, substituting `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BepError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BepError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references (e.g. `${BEP_ENDPOINT}`) with environment values.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BepError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("backend.endpoint", &self.backend.endpoint)?;
        validate_non_empty_string("backend.api_key_env", &self.backend.api_key_env)?;

        if let Some(timeout) = self.backend.timeout_seconds {
            validate_range("backend.timeout_seconds", timeout, 1, 3600)?;
        }

        validate_non_empty_string("models.generation", &self.models.generation)?;
        validate_non_empty_string("models.comparison", &self.models.comparison)?;

        validate_path("output.directory", &self.output.directory)?;
        self.export_format()?;

        Ok(())
    }

    pub fn export_format(&self) -> Result<ExportFormat> {
        match &self.output.format {
            None => Ok(ExportFormat::default()),
            Some(format) => {
                format
                    .parse()
                    .map_err(|reason| BepError::InvalidConfigValueError {
                        field: "output.format".to_string(),
                        value: format.clone(),
                        reason,
                    })
            }
        }
    }

    pub fn output_directory(&self) -> &str {
        &self.output.directory
    }
}

impl BackendSettings for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.backend.endpoint
    }

    fn api_key_env(&self) -> &str {
        &self.backend.api_key_env
    }

    fn generation_model(&self) -> &str {
        &self.models.generation
    }

    fn comparison_model(&self) -> &str {
        &self.models.comparison
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.backend.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.api_key_env(), "API_KEY");
        assert_eq!(config.generation_model(), "gemini-3-flash-preview");
        assert_eq!(config.comparison_model(), "gemini-3-pro-preview");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.export_format().unwrap(), ExportFormat::Markdown);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[backend]
endpoint = "http://localhost:9000/v1beta"
api_key_env = "GEMINI_API_KEY"
timeout_seconds = 90

[models]
generation = "gemini-2.5-flash"
comparison = "gemini-2.5-pro"

[output]
directory = "./plans"
format = "doc"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.endpoint(), "http://localhost:9000/v1beta");
        assert_eq!(config.api_key_env(), "GEMINI_API_KEY");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(config.generation_model(), "gemini-2.5-flash");
        assert_eq!(config.output_directory(), "./plans");
        assert_eq!(config.export_format().unwrap(), ExportFormat::Word);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BEP_TEST_ENDPOINT", "https://proxy.example.com/v1beta");

        let toml_content = r#"
[backend]
endpoint = "${BEP_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.backend.endpoint, "https://proxy.example.com/v1beta");

        std::env::remove_var("BEP_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let invalid_endpoint = TomlConfig::from_toml_str(
            r#"
[backend]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(invalid_endpoint.validate().is_err());

        let blank_model = TomlConfig::from_toml_str(
            r#"
[models]
generation = " "
"#,
        )
        .unwrap();
        assert!(blank_model.validate().is_err());

        let zero_timeout = TomlConfig::from_toml_str(
            r#"
[backend]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(zero_timeout.validate().is_err());

        let bad_format = TomlConfig::from_toml_str(
            r#"
[output]
format = "pdf"
"#,
        )
        .unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[models]
comparison = "file-model"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.comparison_model(), "file-model");
        assert_eq!(config.generation_model(), "gemini-3-flash-preview");
    }
}
