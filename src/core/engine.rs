use crate::core::client::GenerationClient;
use crate::core::prompt::{build_comparison_prompt, build_generation_prompt};
use crate::core::workflow::Workflow;
use crate::domain::model::{ComparisonRequest, ComparisonResult, ProjectData};
use crate::domain::ports::GenerativeBackend;
use crate::utils::error::{BepError, ErrorCategory, Result};

/// Drives a workflow through submit, backend call and settlement.
///
/// The engine holds no workflow state of its own, so the generation and
/// comparison workflows can run at the same time against one engine.
pub struct BepAssistant<B: GenerativeBackend> {
    client: GenerationClient<B>,
}

impl<B: GenerativeBackend> BepAssistant<B> {
    pub fn new(client: GenerationClient<B>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GenerationClient<B> {
        &self.client
    }

    pub async fn generate(
        &self,
        workflow: &mut Workflow<String>,
        data: &ProjectData,
    ) -> Result<String> {
        workflow.submit(data)?;
        tracing::info!("Generating BEP for '{}'", data.project_name);

        let prompt = build_generation_prompt(data);
        match self.client.generate_document(&prompt).await {
            Ok(document) => {
                tracing::info!("BEP generated ({} chars)", document.chars().count());
                workflow.resolve(document.clone())?;
                Ok(document)
            }
            Err(e) => {
                log_failure(workflow.name(), &e);
                workflow.reject()?;
                Err(e)
            }
        }
    }

    pub async fn compare(
        &self,
        workflow: &mut Workflow<ComparisonResult>,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult> {
        workflow.submit(request)?;
        tracing::info!(
            "Comparing {} chars against {}",
            request.text.chars().count(),
            request.standard
        );

        let prompt = build_comparison_prompt(&request.text, &request.standard.to_string());
        match self.client.compare_document(&prompt).await {
            Ok(result) => {
                tracing::info!("Comparison scored {} ({})", result.score, result.band());
                workflow.resolve(result.clone())?;
                Ok(result)
            }
            Err(e) => {
                log_failure(workflow.name(), &e);
                workflow.reject()?;
                Err(e)
            }
        }
    }
}

// Parse failures and transport failures settle the same way but are
// reported separately.
fn log_failure(workflow: &str, error: &BepError) {
    match error.category() {
        ErrorCategory::Response => {
            tracing::error!("Workflow '{}' got an unreadable response: {}", workflow, error)
        }
        _ => tracing::error!("Workflow '{}' backend call failed: {}", workflow, error),
    }
}
