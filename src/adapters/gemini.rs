//! Google Generative Language (`generateContent`) backend.

use crate::config::credentials::ApiKey;
use crate::domain::ports::{GenerationOptions, GenerativeBackend};
use crate::utils::error::{BepError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    status: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let parts = &candidate.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        Some(text)
    }
}

pub struct GeminiBackend {
    client: Client,
    endpoint: String,
    api_key: ApiKey,
}

impl GeminiBackend {
    pub fn new(api_key: ApiKey, endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn model_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Option<String>> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: options.system_instruction.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            generation_config: options
                .response_mime_type
                .as_deref()
                .map(|mime| GenerationConfig {
                    response_mime_type: mime,
                }),
        };

        let url = self.model_url(&options.model);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        tracing::debug!("Gemini response status: {} ({} bytes)", status, raw.len());

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&raw) {
                Ok(envelope) => match envelope.error.status {
                    Some(code) => format!("{}: {}", code, envelope.error.message),
                    None => envelope.error.message,
                },
                Err(_) if raw.trim().is_empty() => {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                }
                Err(_) => raw.chars().take(200).collect(),
            };
            return Err(BepError::BackendError {
                status: Some(status.as_u16()),
                message,
            });
        }

        let parsed: GenerateContentResponse = if raw.trim().is_empty() {
            GenerateContentResponse::default()
        } else {
            serde_json::from_str(&raw).map_err(|e| BepError::BackendError {
                status: Some(status.as_u16()),
                message: format!("malformed generateContent response: {}", e),
            })?
        };

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            tracing::warn!("Prompt blocked by the service: {}", reason);
        }
        if let Some(reason) = parsed
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            if reason != "STOP" {
                tracing::warn!("Generation finished early: {}", reason);
            }
        }

        Ok(parsed.text())
    }
}
