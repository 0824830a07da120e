use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use medicombine::api::{ApiClient, ExportFormat, HttpApiClient, PatientInput};
use medicombine::config::Config;
use medicombine::error::AppError;
use medicombine::render;
use medicombine::workflow::export::{self, ExportOutcome};
use medicombine::workflow::{Orchestrator, ViewState};

#[derive(Parser)]
#[command(name = "medicombine")]
#[command(version = "1.0.0")]
#[command(about = "Generate AI-assisted drug combination therapies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate therapy combinations for a patient record
    Generate {
        /// Path to the patient JSON file, or '-' for stdin
        patient: PathBuf,

        /// Skip the drug-interaction matrix lookup
        #[arg(long)]
        no_interaction_check: bool,

        /// Export the generated result set after a successful cycle
        #[arg(long, value_enum)]
        export: Option<ExportArg>,
    },

    /// Check pairwise interactions for a list of drugs
    Interactions {
        /// Drug names (at least two)
        drugs: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportArg {
    Csv,
    Pdf,
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Csv => ExportFormat::Csv,
            ExportArg::Pdf => ExportFormat::Pdf,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("medicombine=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client: Arc<dyn ApiClient> = Arc::new(HttpApiClient::new(&config)?);

    match cli.command {
        Commands::Generate {
            patient,
            no_interaction_check,
            export,
        } => run_generate(client, &patient, no_interaction_check, export).await,
        Commands::Interactions { drugs } => run_interactions(client, drugs).await,
    }
}

async fn run_generate(
    client: Arc<dyn ApiClient>,
    patient_path: &PathBuf,
    no_interaction_check: bool,
    export_arg: Option<ExportArg>,
) -> anyhow::Result<()> {
    let mut patient = load_patient(patient_path)?;
    if no_interaction_check {
        patient.enable_interaction_check = false;
    }
    patient.validate()?;

    let orchestrator = Orchestrator::new(client.clone());
    orchestrator.submit(patient).await;
    let cycle = orchestrator.snapshot();

    match &cycle.view {
        ViewState::Success => {
            print!("{}", render::render_results(&cycle));
        }
        ViewState::Error(detail) => anyhow::bail!("{detail}"),
        state => anyhow::bail!("cycle ended in unexpected state {state:?}"),
    }

    // Export failure is reported on its own and never unwinds the result
    // view that was just printed.
    if let Some(arg) = export_arg {
        let format = ExportFormat::from(arg);
        match export::export_as(client.as_ref(), format, cycle.combinations.as_ref()).await {
            Ok(ExportOutcome::Exported) => {
                eprintln!("{} exported successfully", format.as_str().to_uppercase());
            }
            Ok(ExportOutcome::Skipped) => {
                eprintln!("nothing to export");
            }
            Err(err) => {
                eprintln!("Error exporting {}: {err}", format.as_str().to_uppercase());
            }
        }
    }

    Ok(())
}

async fn run_interactions(client: Arc<dyn ApiClient>, drugs: Vec<String>) -> anyhow::Result<()> {
    if drugs.len() < 2 {
        return Err(AppError::Validation(
            "at least two drug names are required".into(),
        )
        .into());
    }

    let list = client.check_interactions(&drugs).await?;
    print!("{}", render::render_interactions(&list.interactions));
    Ok(())
}

fn load_patient(path: &PathBuf) -> anyhow::Result<PatientInput> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read patient record from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read patient record {}", path.display()))?
    };

    serde_json::from_str(&contents).context("patient record is not valid JSON")
}
