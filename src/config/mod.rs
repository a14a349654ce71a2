pub mod credentials;
pub mod project_file;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::export::ExportFormat;
#[cfg(feature = "cli")]
use crate::domain::model::{
    ComparisonRequest, Discipline, Lod, ProjectData, ProjectType, Software, Standard,
};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "bep-assistant")]
#[command(about = "Draft and review BIM Execution Plans with a generative model")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the output directory from the config
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate a BEP from project parameters
    Generate(GenerateArgs),
    /// Score an existing BEP against a standard
    Compare(CompareArgs),
    /// List every accepted catalog value
    Catalog,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Load project parameters from a .toml or .json file; flags override it
    #[arg(long)]
    pub project_file: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub project_type: Option<ProjectType>,

    /// Repeat or comma-separate, e.g. --discipline architecture,structure
    #[arg(long = "discipline", value_delimiter = ',')]
    pub disciplines: Vec<Discipline>,

    #[arg(long = "software", value_delimiter = ',')]
    pub software: Vec<Software>,

    #[arg(long)]
    pub lod: Option<Lod>,

    #[arg(long)]
    pub standard: Option<Standard>,

    #[arg(long)]
    pub notes: Option<String>,

    /// md or doc; defaults to the config's output.format
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Also print the document to stdout
    #[arg(long)]
    pub print: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    /// Existing BEP as a .txt, .md or .json file
    #[arg(long, conflicts_with = "text", required_unless_present = "text")]
    pub input: Option<String>,

    /// Existing BEP text given inline
    #[arg(long)]
    pub text: Option<String>,

    #[arg(long, default_value_t = Standard::default())]
    pub standard: Standard,

    /// Print the result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl GenerateArgs {
    /// Applies flags on top of `base` (a loaded project file or defaults).
    pub fn apply_to(&self, mut base: ProjectData) -> ProjectData {
        if let Some(name) = &self.name {
            base.project_name = name.clone();
        }
        if let Some(project_type) = self.project_type {
            base.project_type = project_type;
        }
        if !self.disciplines.is_empty() {
            base.disciplines = self.disciplines.iter().copied().collect();
        }
        if !self.software.is_empty() {
            base.software = self.software.iter().copied().collect();
        }
        if let Some(lod) = self.lod {
            base.lod = lod;
        }
        if let Some(standard) = self.standard {
            base.standards = standard;
        }
        if let Some(notes) = &self.notes {
            base.additional_notes = notes.clone();
        }
        base
    }
}

#[cfg(feature = "cli")]
impl CompareArgs {
    pub fn request(&self, text: String) -> ComparisonRequest {
        ComparisonRequest::new(text, self.standard)
    }
}
