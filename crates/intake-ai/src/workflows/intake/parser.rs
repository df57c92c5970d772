use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::IntakeImportError;
use crate::workflows::eligibility::IntakeRecord;

/// Columns every intake export must carry. Order here is also the record
/// column order in the results artifact.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "service_date",
    "dob",
    "last_name",
    "first_name",
    "phone",
    "address",
    "state",
    "gender",
    "insurance_provider",
    "patient_id",
    "member_id",
    "member_group",
];

/// A parsed intake export: the records plus whatever extra columns the
/// export carried, preserved for passthrough into the artifacts.
#[derive(Debug, Default)]
pub struct IntakeBatch {
    pub records: Vec<IntakeRecord>,
    /// Non-required input columns, in input order.
    pub extra_columns: Vec<String>,
}

pub fn read_batch_from_path(path: impl AsRef<Path>) -> Result<IntakeBatch, IntakeImportError> {
    let file = std::fs::File::open(path)?;
    read_batch(file)
}

/// Reads the export, failing up front when required columns are absent.
/// Field values are trimmed; short rows read as empty fields rather than
/// aborting the batch.
pub fn read_batch<R: Read>(reader: R) -> Result<IntakeBatch, IntakeImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|name| name.to_string())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !headers.iter().any(|header| header == *name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IntakeImportError::MissingColumns(missing));
    }

    let positions: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect();
    let extras: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !REQUIRED_COLUMNS.contains(&name.as_str()))
        .map(|(index, name)| (index, name.clone()))
        .collect();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let field = |name: &str| -> String {
            positions
                .get(name)
                .and_then(|&index| row.get(index))
                .unwrap_or_default()
                .to_string()
        };

        records.push(IntakeRecord {
            patient_id: field("patient_id"),
            first_name: field("first_name"),
            last_name: field("last_name"),
            dob: field("dob"),
            service_date: field("service_date"),
            phone: field("phone"),
            address: field("address"),
            state: field("state"),
            gender: field("gender"),
            insurance_provider: field("insurance_provider"),
            member_id: field("member_id"),
            member_group: field("member_group"),
            extras: extras
                .iter()
                .map(|(index, name)| {
                    (
                        name.clone(),
                        row.get(*index).unwrap_or_default().to_string(),
                    )
                })
                .collect(),
        });
    }

    Ok(IntakeBatch {
        records,
        extra_columns: extras.into_iter().map(|(_, name)| name).collect(),
    })
}
