use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use futures::stream::{self, StreamExt};
use tracing::info;

use super::artifacts::{self, RunContext};
use super::parser::read_batch_from_path;
use super::RunError;
use crate::workflows::eligibility::{
    build_queue, summarize, BatchSummary, EligibilityEvaluator, EvaluatedIntake, PayerRuleSet,
    QueueDomain, ReasonClassifier, RemoteEligibilityClient,
};

/// Everything one run needs, resolved before any work starts.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub rules: PathBuf,
    pub outputs_root: PathBuf,
    /// Base address of the payer eligibility endpoint. `None` or blank
    /// means local-only evaluation.
    pub api_url: Option<String>,
    pub api_timeout: Duration,
    pub archive_input: bool,
    /// Upper bound on in-flight evaluations; values below one are lifted.
    pub concurrency: usize,
}

/// Paths of everything a finished run wrote, plus the computed summary.
#[derive(Debug)]
pub struct RunArtifacts {
    pub output_dir: PathBuf,
    pub results_csv: PathBuf,
    pub summary_json: PathBuf,
    pub registration_queue_csv: PathBuf,
    pub insurance_queue_csv: PathBuf,
    pub summary: BatchSummary,
}

/// Runs one batch end to end: load, evaluate, route, summarize, write.
///
/// Input and rules problems abort before any record is evaluated. Record
/// evaluations run concurrently up to the configured bound; every artifact
/// is derived only after the whole batch has been decided.
pub async fn execute(options: RunOptions) -> Result<RunArtifacts, RunError> {
    if !options.input.exists() {
        return Err(RunError::MissingInput(options.input.clone()));
    }
    if !options.rules.exists() {
        return Err(RunError::MissingRules(options.rules.clone()));
    }

    let ctx = RunContext::new(&options.outputs_root, Local::now());
    info!(
        timestamp = ctx.timestamp(),
        output_dir = %ctx.output_dir().display(),
        "starting eligibility run"
    );

    let rules = PayerRuleSet::from_path(&options.rules)?;
    let batch = read_batch_from_path(&options.input)?;
    info!(
        records = batch.records.len(),
        payers = rules.len(),
        "loaded intake batch and payer rules"
    );

    ctx.ensure_output_dir()?;
    if options.archive_input {
        let archived = ctx.archive_input(&options.input)?;
        info!(path = %archived.display(), "archived input file");
    }

    let api_url = options
        .api_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    let evaluator = match api_url {
        Some(url) => EligibilityEvaluator::RemoteWithFallback(RemoteEligibilityClient::new(
            url,
            options.api_timeout,
        )?),
        None => EligibilityEvaluator::Local,
    };
    let remote_mode = evaluator.is_remote();
    info!(
        remote_mode,
        timeout_secs = options.api_timeout.as_secs_f64(),
        "api mode resolved"
    );

    let today = ctx.today();
    let concurrency = options.concurrency.max(1);
    let results: Vec<_> = stream::iter(batch.records.iter())
        .map(|record| {
            let evaluator = &evaluator;
            let rules = &rules;
            async move { evaluator.evaluate(record, rules, today).await }
        })
        .buffered(concurrency)
        .collect()
        .await;

    let evaluated: Vec<EvaluatedIntake> = batch
        .records
        .into_iter()
        .zip(results)
        .map(|(record, result)| EvaluatedIntake { record, result })
        .collect();

    let classifier = ReasonClassifier::new(remote_mode);
    let registration = build_queue(&evaluated, &classifier, QueueDomain::Registration);
    let insurance = build_queue(&evaluated, &classifier, QueueDomain::Insurance);
    let summary = summarize(&evaluated, remote_mode, ctx.timestamp(), ctx.output_dir());

    let results_csv = ctx.results_path();
    artifacts::write_results_csv(&results_csv, &evaluated, &batch.extra_columns, remote_mode)?;
    let summary_json = ctx.summary_path();
    artifacts::write_summary_json(&summary_json, &summary)?;
    let registration_queue_csv = ctx.queue_path(QueueDomain::Registration);
    artifacts::write_queue_csv(
        &registration_queue_csv,
        &registration,
        &batch.extra_columns,
        remote_mode,
    )?;
    let insurance_queue_csv = ctx.queue_path(QueueDomain::Insurance);
    artifacts::write_queue_csv(
        &insurance_queue_csv,
        &insurance,
        &batch.extra_columns,
        remote_mode,
    )?;

    info!(
        total = summary.total_records,
        approved = summary.status_counts.approved,
        review = summary.status_counts.review,
        rejected = summary.status_counts.rejected,
        registration_queue = registration.len(),
        insurance_queue = insurance.len(),
        "run complete"
    );

    Ok(RunArtifacts {
        output_dir: ctx.output_dir().to_path_buf(),
        results_csv,
        summary_json,
        registration_queue_csv,
        insurance_queue_csv,
        summary,
    })
}
