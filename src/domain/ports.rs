use crate::utils::error::Result;
use crate::utils::json::parse_json_body;
use async_trait::async_trait;
use std::time::Duration;

pub const JSON_MIME_TYPE: &str = "application/json";

/// Per-call options understood by a generative backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    pub model: String,
    pub system_instruction: Option<String>,
    pub response_mime_type: Option<String>,
}

impl GenerationOptions {
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.response_mime_type = Some(mime_type.into());
        self
    }
}

/// A hosted text model. Implementations own transport and credentials.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Returns the response text, or `None` when the service answered
    /// without any.
    async fn generate_text(&self, prompt: &str, options: &GenerationOptions)
        -> Result<Option<String>>;

    /// Requests JSON output and parses it. An empty answer reads as `{}`.
    async fn generate_structured(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<serde_json::Value> {
        let mut options = options.clone();
        options
            .response_mime_type
            .get_or_insert_with(|| JSON_MIME_TYPE.to_string());

        let text = self.generate_text(prompt, &options).await?;
        parse_json_body(text.as_deref())
    }
}

pub trait BackendSettings: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key_env(&self) -> &str;
    fn generation_model(&self) -> &str;
    fn comparison_model(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
