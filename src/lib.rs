pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{gemini::GeminiBackend, storage::LocalStorage};
pub use config::{credentials::ApiKey, toml_config::TomlConfig};
pub use core::{
    client::{GenerationClient, ModelSelection},
    engine::BepAssistant,
    workflow::{Workflow, WorkflowPhase, WorkflowState},
};
pub use domain::model::{
    catalog_aliases, ComparisonRequest, ComparisonResult, ComplianceBand, Discipline, Lod,
    ProjectData, ProjectType, Software, Standard,
};
pub use utils::error::{BepError, Result};
