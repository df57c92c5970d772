//! Batch intake pipeline: CSV ingestion, per-record evaluation, and the
//! artifact set each run writes under its timestamped output folder.

mod artifacts;
mod parser;
mod processor;

pub use artifacts::RunContext;
pub use parser::{read_batch, read_batch_from_path, IntakeBatch, REQUIRED_COLUMNS};
pub use processor::{execute, RunArtifacts, RunOptions};

use std::path::PathBuf;

use crate::workflows::eligibility::{RemoteCallError, RulesError};

#[derive(Debug)]
pub enum IntakeImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumns(Vec<String>),
}

impl std::fmt::Display for IntakeImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeImportError::Io(err) => write!(f, "failed to read intake export: {}", err),
            IntakeImportError::Csv(err) => write!(f, "invalid intake CSV data: {}", err),
            IntakeImportError::MissingColumns(columns) => write!(
                f,
                "input is missing required columns: {}",
                columns.join(", ")
            ),
        }
    }
}

impl std::error::Error for IntakeImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeImportError::Io(err) => Some(err),
            IntakeImportError::Csv(err) => Some(err),
            IntakeImportError::MissingColumns(_) => None,
        }
    }
}

impl From<std::io::Error> for IntakeImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IntakeImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Anything that can abort a batch run. Per-record faults never show up
/// here; they become reason codes instead.
#[derive(Debug)]
pub enum RunError {
    MissingInput(PathBuf),
    MissingRules(PathBuf),
    Import(IntakeImportError),
    Rules(RulesError),
    RemoteClient(RemoteCallError),
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::MissingInput(path) => write!(f, "missing input file: {}", path.display()),
            RunError::MissingRules(path) => write!(f, "missing rules file: {}", path.display()),
            RunError::Import(err) => write!(f, "could not load the intake batch: {}", err),
            RunError::Rules(err) => write!(f, "could not load payer rules: {}", err),
            RunError::RemoteClient(err) => {
                write!(f, "could not set up the eligibility api client: {}", err)
            }
            RunError::Io(err) => write!(f, "io error: {}", err),
            RunError::Csv(err) => write!(f, "could not write csv artifact: {}", err),
            RunError::Json(err) => write!(f, "could not serialize the run summary: {}", err),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::MissingInput(_) | RunError::MissingRules(_) => None,
            RunError::Import(err) => Some(err),
            RunError::Rules(err) => Some(err),
            RunError::RemoteClient(err) => Some(err),
            RunError::Io(err) => Some(err),
            RunError::Csv(err) => Some(err),
            RunError::Json(err) => Some(err),
        }
    }
}

impl From<IntakeImportError> for RunError {
    fn from(err: IntakeImportError) -> Self {
        Self::Import(err)
    }
}

impl From<RulesError> for RunError {
    fn from(err: RulesError) -> Self {
        Self::Rules(err)
    }
}

impl From<RemoteCallError> for RunError {
    fn from(err: RemoteCallError) -> Self {
        Self::RemoteClient(err)
    }
}

impl From<std::io::Error> for RunError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RunError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for RunError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
