use bep_assistant::adapters::storage::read_text_document;
use bep_assistant::config::project_file::load_project_file;
use bep_assistant::config::{CompareArgs, Command, GenerateArgs, LogFormat};
use bep_assistant::core::export::{self, ExportFormat};
use bep_assistant::domain::ports::Storage;
use bep_assistant::utils::error::ErrorSeverity;
use bep_assistant::utils::validation::{validate_file_extensions, Validate};
use bep_assistant::utils::logger;
use bep_assistant::{
    catalog_aliases, BepAssistant, BepError, CliConfig, ComparisonResult, Discipline, GeminiBackend,
    GenerationClient, LocalStorage, Lod, ProjectData, ProjectType, Result, Software, Standard,
    TomlConfig, Workflow,
};
use clap::Parser;
use std::path::Path;
use strum::{EnumMessage, IntoEnumIterator};

const COMPARE_INPUT_EXTENSIONS: [&str; 3] = ["txt", "md", "json"];

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::info!("Starting bep-assistant");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    if let Command::Catalog = cli.command {
        print_catalog();
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    config.validate()?;

    let client = GenerationClient::from_env(&config)?;
    tracing::info!(
        "Using {} (generation: {}, comparison: {})",
        client.backend().endpoint(),
        client.models().generation,
        client.models().comparison
    );
    let assistant = BepAssistant::new(client);
    let storage = LocalStorage::new(config.output_directory());

    match cli.command {
        Command::Generate(args) => generate(&assistant, &storage, &config, &args).await,
        Command::Compare(args) => compare(&assistant, &storage, &args).await,
        Command::Catalog => Ok(()),
    }
}

async fn generate(
    assistant: &BepAssistant<GeminiBackend>,
    storage: &LocalStorage,
    config: &TomlConfig,
    args: &GenerateArgs,
) -> Result<()> {
    let base = match &args.project_file {
        Some(path) => load_project_file(path)?,
        None => ProjectData::default(),
    };
    let data = args.apply_to(base);
    let format = match args.format {
        Some(format) => format,
        None => config.export_format()?,
    };

    let mut workflow = Workflow::new("generate");
    let document = assistant.generate(&mut workflow, &data).await?;

    let title = format!("{} BIM Execution Plan", data.project_name.trim());
    let rendered = export::render(&document, &title, format, chrono::Utc::now());
    let file_name = export::export_file_name(&data.project_name, format);
    let written = storage.write_file(&file_name, rendered.as_bytes()).await?;

    tracing::info!("✅ BEP generated ({})", workflow.phase());
    println!("✅ BEP generated for '{}'", data.project_name.trim());
    println!("📁 Output saved to: {}", written);
    if args.print {
        println!("\n{}", document);
    }
    Ok(())
}

async fn compare(
    assistant: &BepAssistant<GeminiBackend>,
    storage: &LocalStorage,
    args: &CompareArgs,
) -> Result<()> {
    let (text, stem) = match (&args.input, &args.text) {
        (Some(path), _) => {
            validate_file_extensions("input", &[path.clone()], &COMPARE_INPUT_EXTENSIONS)?;
            let text = read_text_document(path).await?;
            let stem = Path::new(path)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document")
                .to_string();
            (text, stem)
        }
        (None, Some(text)) => (text.clone(), "document".to_string()),
        (None, None) => {
            return Err(BepError::validation("provide --input or --text"));
        }
    };

    let request = args.request(text);
    let mut workflow = Workflow::new("compare");
    let result = assistant.compare(&mut workflow, &request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_comparison(&result);
    }

    let report = format!(
        "# Compliance Report: {}\n\n**Standard:** {}  \n**Score:** {}/100 ({})  \n**Generated:** {}\n\n{}\n",
        stem,
        request.standard,
        result.score,
        result.band(),
        chrono::Utc::now().to_rfc3339(),
        result.analysis
    );
    let file_name = format!("{}_comparison.{}", stem, ExportFormat::Markdown.extension());
    let written = storage.write_file(&file_name, report.as_bytes()).await?;
    tracing::info!("📁 Report saved to: {}", written);
    Ok(())
}

fn print_comparison(result: &ComparisonResult) {
    let marker = match result.band() {
        bep_assistant::ComplianceBand::Compliant => "✅",
        _ => "⚠️",
    };
    println!("{} Score: {}/100 ({})", marker, result.score, result.band());
    println!("\n{}", result.analysis);
}

fn print_catalog() {
    fn section<T: std::fmt::Display + EnumMessage>(title: &str, items: impl Iterator<Item = T>) {
        println!("{}:", title);
        for item in items {
            let aliases = catalog_aliases(&item);
            if aliases.is_empty() {
                println!("  - {}", item);
            } else {
                println!("  - {} [{}]", item, aliases.join(", "));
            }
        }
    }

    section("Project types", ProjectType::iter());
    section("Disciplines", Discipline::iter());
    section("Software", Software::iter());
    section("LOD levels", Lod::iter());
    section("Standards", Standard::iter());
}
