//! Replay input: result rows produced by an upstream harness run.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::record::ResultRow;

/// Read replay rows from a headerless five-column CSV file:
/// document, independent variable, dependent variable, predicted, coded.
pub fn read_rows(path: &Path) -> Result<Vec<ResultRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("open replay rows {}", path.display()))?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read replay row {}", index + 1))?;
        if record.len() != 5 {
            bail!(
                "replay row {} has {} fields, expected 5",
                index + 1,
                record.len()
            );
        }
        rows.push(ResultRow {
            document_name: record[0].to_string(),
            independent_variable: record[1].to_string(),
            dependent_variable: record[2].to_string(),
            predicted: record[3].to_string(),
            coded: record[4].to_string(),
        });
    }
    Ok(rows)
}
