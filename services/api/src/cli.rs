use std::path::PathBuf;

use crate::demo::{run_demo, DemoArgs};
use crate::runner::run_batch;
use crate::server;
use clap::{Args, Parser, Subcommand};
use intake_ai::error::AppError;

const DEFAULT_INPUT: &str = "data/patient_intake.csv";
const DEFAULT_RULES: &str = "data/insurance_rules.json";
const DEFAULT_API_TIMEOUT_SECS: f64 = 5.0;

#[derive(Parser, Debug)]
#[command(
    name = "Patient Intake Eligibility Engine",
    about = "Evaluate patient intake exports and run the supporting services from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an intake export and write run artifacts (default command)
    Run(RunArgs),
    /// Start the stand-in payer eligibility HTTP service
    Serve(ServeArgs),
    /// Run a CLI demo over a handful of inline intake records
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// Path to the patient intake CSV export
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub(crate) input: PathBuf,
    /// Path to the payer rules JSON
    #[arg(long, default_value = DEFAULT_RULES)]
    pub(crate) rules: PathBuf,
    /// Base URL of an eligibility API; when set, decisions come from the API
    /// with per-record fallback to the local rules
    #[arg(long)]
    pub(crate) api_url: Option<String>,
    /// Eligibility API timeout in seconds
    #[arg(long, default_value_t = DEFAULT_API_TIMEOUT_SECS)]
    pub(crate) api_timeout: f64,
    /// Copy the input CSV into this run's output folder for audit continuity
    #[arg(long)]
    pub(crate) archive_input: bool,
    /// Override the configured root folder for run outputs
    #[arg(long)]
    pub(crate) outputs_dir: Option<PathBuf>,
    /// Override the configured number of records evaluated in flight
    #[arg(long)]
    pub(crate) concurrency: Option<usize>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            rules: PathBuf::from(DEFAULT_RULES),
            api_url: None,
            api_timeout: DEFAULT_API_TIMEOUT_SECS,
            archive_input: false,
            outputs_dir: None,
            concurrency: None,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Command::Run(RunArgs::default()));

    match command {
        Command::Run(args) => run_batch(args).await,
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
    }
}
