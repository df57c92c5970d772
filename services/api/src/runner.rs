use std::time::Duration;

use intake_ai::config::AppConfig;
use intake_ai::error::AppError;
use intake_ai::telemetry;
use intake_ai::workflows::intake::{execute, RunOptions};
use tracing::info;

use crate::cli::RunArgs;

/// Resolves CLI overrides against the loaded configuration and runs one
/// intake batch end to end.
pub(crate) async fn run_batch(args: RunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let options = RunOptions {
        input: args.input,
        rules: args.rules,
        outputs_root: args.outputs_dir.unwrap_or(config.runs.outputs_dir),
        api_url: args.api_url,
        api_timeout: Duration::from_secs_f64(args.api_timeout.max(0.0)),
        archive_input: args.archive_input,
        concurrency: args
            .concurrency
            .unwrap_or(config.runs.evaluation_concurrency),
    };

    let artifacts = execute(options).await?;
    info!(
        results = %artifacts.results_csv.display(),
        summary = %artifacts.summary_json.display(),
        registration_queue = %artifacts.registration_queue_csv.display(),
        insurance_queue = %artifacts.insurance_queue_csv.display(),
        "run artifacts written"
    );

    Ok(())
}
