use anyhow::Result;
use bep_assistant::core::export::{self, ExportFormat};
use bep_assistant::domain::ports::Storage;
use bep_assistant::{
    ApiKey, BepAssistant, BepError, ComparisonRequest, Discipline, GenerationClient, LocalStorage,
    ProjectData, Software, Standard, TomlConfig, Workflow, WorkflowPhase, WorkflowState,
};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn assistant_for(server: &MockServer) -> BepAssistant<bep_assistant::GeminiBackend> {
    let config = TomlConfig::from_toml_str(&format!(
        "[backend]\nendpoint = \"{}\"\n",
        server.url("/v1beta")
    ))
    .unwrap();
    let client = GenerationClient::gemini(ApiKey::new("it-key").unwrap(), &config).unwrap();
    BepAssistant::new(client)
}

fn reply(text: &str) -> serde_json::Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
}

fn harbour_tower() -> ProjectData {
    let mut data = ProjectData::new("Harbour Tower");
    data.toggle_discipline(Discipline::Architecture);
    data.toggle_discipline(Discipline::Electrical);
    data.toggle_software(Software::Revit);
    data.standards = Standard::SingaporeBca;
    data
}

#[tokio::test]
async fn test_end_to_end_generate_and_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let markdown = "# Harbour Tower BEP\n\n| Role | Party |\n|---|---|\n| Lead Appointed Party | Studio |\n";
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-3-flash-preview:generateContent")
            .body_contains("Singapore BCA BIM Guide")
            .body_contains("Electrical");
        then.status(200).json_body(reply(markdown));
    });

    let assistant = assistant_for(&server);
    let mut workflow = Workflow::new("generate");
    let data = harbour_tower();

    let document = assistant.generate(&mut workflow, &data).await?;
    api_mock.assert();
    assert_eq!(workflow.state(), &WorkflowState::Success(markdown.to_string()));

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());
    let file_name = export::export_file_name(&data.project_name, ExportFormat::Word);
    let rendered = export::render(
        &document,
        "Harbour Tower BIM Execution Plan",
        ExportFormat::Word,
        chrono::Utc::now(),
    );
    storage.write_file(&file_name, rendered.as_bytes()).await?;

    let saved = std::fs::read_to_string(temp_dir.path().join("Harbour_Tower_BEP.doc"))?;
    assert!(saved.contains("urn:schemas-microsoft-com:office:word"));
    assert!(saved.contains("<table>"));
    assert!(saved.contains("Lead Appointed Party"));
    Ok(())
}

#[tokio::test]
async fn test_compare_long_document_with_fenced_reply() {
    let server = MockServer::start();
    let document = format!("# Existing BEP\n{}", "Clause text. ".repeat(3_000));

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-3-pro-preview:generateContent")
            .body_contains("US NBIMS");
        then.status(200)
            .json_body(reply("```json\n{\"analysis\": \"## Gaps\", \"score\": 45}\n```"));
    });

    let assistant = assistant_for(&server);
    let mut workflow = Workflow::new("compare");
    let request = ComparisonRequest::new(document, Standard::UsNbims);

    let result = assistant.compare(&mut workflow, &request).await.unwrap();

    api_mock.assert();
    assert_eq!(result.score, 45);
    assert_eq!(result.analysis, "## Gaps");
    assert_eq!(workflow.payload(), Some(&result));
}

#[tokio::test]
async fn test_backend_failure_then_retry_succeeds() {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(POST);
        then.status(500).body("upstream unavailable");
    });

    let assistant = assistant_for(&server);
    let mut workflow = Workflow::new("generate");
    let data = harbour_tower();

    let err = assistant.generate(&mut workflow, &data).await.unwrap_err();
    assert!(matches!(err, BepError::BackendError { status: Some(500), .. }));
    assert!(err.is_retryable());
    assert_eq!(workflow.phase(), WorkflowPhase::Error);
    failing.assert();
    failing.delete();

    server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(reply("# Retried"));
    });

    let document = assistant.generate(&mut workflow, &data).await.unwrap();
    assert_eq!(document, "# Retried");
    assert_eq!(workflow.phase(), WorkflowPhase::Success);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_backend() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(reply("unused"));
    });

    let assistant = assistant_for(&server);

    let mut generator = Workflow::new("generate");
    let err = assistant
        .generate(&mut generator, &ProjectData::new("No Disciplines"))
        .await
        .unwrap_err();
    assert!(matches!(err, BepError::ValidationError { .. }));

    let mut comparator = Workflow::new("compare");
    let err = assistant
        .compare(&mut comparator, &ComparisonRequest::new("", Standard::Iso19650))
        .await
        .unwrap_err();
    assert!(matches!(err, BepError::ValidationError { .. }));

    api_mock.assert_hits(0);
    assert_eq!(generator.phase(), WorkflowPhase::Idle);
    assert_eq!(comparator.phase(), WorkflowPhase::Idle);
}

#[tokio::test]
async fn test_hung_backend_times_out_into_error_phase() {
    let server = MockServer::start();
    let slow = server.mock(|when, then| {
        when.method(POST);
        then.status(200)
            .delay(std::time::Duration::from_secs(3))
            .json_body(reply("# Too late"));
    });

    let config = TomlConfig::from_toml_str(&format!(
        "[backend]\nendpoint = \"{}\"\ntimeout_seconds = 1\n",
        server.url("/v1beta")
    ))
    .unwrap();
    let client = GenerationClient::gemini(ApiKey::new("it-key").unwrap(), &config).unwrap();
    let assistant = BepAssistant::new(client);
    let mut workflow = Workflow::new("generate");

    let started = std::time::Instant::now();
    let err = assistant
        .generate(&mut workflow, &harbour_tower())
        .await
        .unwrap_err();

    assert!(started.elapsed() < std::time::Duration::from_secs(3));
    match &err {
        BepError::HttpError(e) => assert!(e.is_timeout()),
        other => panic!("expected a timed-out request, got {:?}", other),
    }
    assert!(err.is_retryable());
    assert_eq!(workflow.phase(), WorkflowPhase::Error);
    slow.assert();
}
