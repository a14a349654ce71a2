use crate::adapters::gemini::GeminiBackend;
use crate::config::credentials::ApiKey;
use crate::core::prompt::GENERATION_SYSTEM_INSTRUCTION;
use crate::domain::model::ComparisonResult;
use crate::domain::ports::{BackendSettings, GenerationOptions, GenerativeBackend, JSON_MIME_TYPE};
use crate::utils::error::Result;
use serde_json::Value;

pub const DEFAULT_GENERATION_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_COMPARISON_MODEL: &str = "gemini-3-pro-preview";

pub const GENERATION_FALLBACK: &str = "Failed to generate content.";
pub const ANALYSIS_FALLBACK: &str = "Analysis failed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub generation: String,
    pub comparison: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            generation: DEFAULT_GENERATION_MODEL.to_string(),
            comparison: DEFAULT_COMPARISON_MODEL.to_string(),
        }
    }
}

/// The only component that talks to the generative service. It never
/// retries; callers decide whether to submit again.
pub struct GenerationClient<B: GenerativeBackend> {
    backend: B,
    models: ModelSelection,
}

impl<B: GenerativeBackend> GenerationClient<B> {
    pub fn new(backend: B, models: ModelSelection) -> Self {
        Self { backend, models }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn models(&self) -> &ModelSelection {
        &self.models
    }

    pub async fn generate_document(&self, prompt: &str) -> Result<String> {
        let options = GenerationOptions::for_model(&self.models.generation)
            .with_system_instruction(GENERATION_SYSTEM_INSTRUCTION);

        tracing::debug!(
            "Requesting document from {} ({} prompt chars)",
            options.model,
            prompt.chars().count()
        );
        let text = self.backend.generate_text(prompt, &options).await?;

        match text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => {
                tracing::warn!("Backend returned no text, using fallback document");
                Ok(GENERATION_FALLBACK.to_string())
            }
        }
    }

    pub async fn compare_document(&self, prompt: &str) -> Result<ComparisonResult> {
        let options = GenerationOptions::for_model(&self.models.comparison)
            .with_response_mime_type(JSON_MIME_TYPE);

        tracing::debug!(
            "Requesting comparison from {} ({} prompt chars)",
            options.model,
            prompt.chars().count()
        );
        let body = self.backend.generate_structured(prompt, &options).await?;
        Ok(comparison_from_json(&body))
    }
}

impl GenerationClient<GeminiBackend> {
    /// Builds a Gemini-backed client with an explicit credential.
    pub fn gemini(api_key: ApiKey, settings: &impl BackendSettings) -> Result<Self> {
        let backend = GeminiBackend::new(api_key, settings.endpoint(), settings.request_timeout())?;
        let models = ModelSelection {
            generation: settings.generation_model().to_string(),
            comparison: settings.comparison_model().to_string(),
        };
        Ok(Self::new(backend, models))
    }

    /// Resolves the credential from the environment variable named in the
    /// settings. A missing key is a configuration error.
    pub fn from_env(settings: &impl BackendSettings) -> Result<Self> {
        let api_key = ApiKey::from_env(settings.api_key_env())?;
        Self::gemini(api_key, settings)
    }
}

/// Maps a parsed comparison body onto a result, defaulting absent fields.
pub fn comparison_from_json(body: &Value) -> ComparisonResult {
    let analysis = match body.get("analysis") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => ANALYSIS_FALLBACK.to_string(),
    };

    let score = match body.get("score") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(other) => {
            if !other.is_null() {
                tracing::warn!("Ignoring non-numeric score: {}", other);
            }
            0
        }
        None => 0,
    };

    ComparisonResult { analysis, score }
}
