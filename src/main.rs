use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nodule_compass::adapters::SchemaInputValidator;
use nodule_compass::application::{
    AssessNoduleCommand, AssessNoduleHandler, RunValidationCasesCommand, RunValidationCasesHandler,
};
use nodule_compass::config::{AppConfig, LoggingConfig};
use nodule_compass::domain::clinical_cases::CasePackage;
use nodule_compass::domain::foundation::Timestamp;
use nodule_compass::domain::nodule::AssessmentInput;

#[derive(Parser, Debug)]
#[command(
    name = "nodule-compass",
    version,
    about = "Pulmonary nodule follow-up classification and malignancy risk models"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assess one nodule; reads a JSON request from the file or stdin
    Assess {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Run a reference case package and print the report
    ValidateCases {
        /// YAML or JSON package; the built-in package when absent
        #[arg(long)]
        package: Option<PathBuf>,
    },
    /// Print the built-in reference case package as JSON
    ExportCases,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Assess { input } => {
            let raw = read_source(input.as_deref())?;
            let input: AssessmentInput =
                serde_json::from_str(&raw).context("malformed assessment request")?;

            let validator = SchemaInputValidator::new()
                .with_require_risk_level(config.engine.require_risk_level);
            let handler = AssessNoduleHandler::new(Arc::new(validator), config.engine);
            let result = handler.handle(AssessNoduleCommand { input })?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::ValidateCases { package } => {
            let package = package.as_deref().map(load_package).transpose()?;
            let report = RunValidationCasesHandler::new().handle(RunValidationCasesCommand { package });

            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.all_passed() {
                anyhow::bail!("{} of {} cases failed", report.failed, report.total_cases);
            }
        }
        Commands::ExportCases => {
            println!("{}", CasePackage::builtin().to_json(Timestamp::now())?);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays pure JSON.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.is_json() {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

fn read_source(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn load_package(path: &Path) -> anyhow::Result<CasePackage> {
    let raw = read_source(Some(path))?;
    let package = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => CasePackage::from_json(&raw)?,
        _ => CasePackage::from_yaml(&raw)?,
    };
    Ok(package)
}
