//! Tabular stage files: an untyped string table for the inspection stages and
//! typed serde readers/writers for the engineered stages.

mod ingest;
mod table;

pub use ingest::ingest;
pub use table::{is_missing, ColumnKind, Table};

use crate::error::{PipelineError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read every row of a CSV into `T`, matching fields by header name
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut out = Vec::new();
    for row in reader.deserialize() {
        out.push(row?);
    }
    Ok(out)
}

/// Fail with the first of `columns` absent from the file's header row
pub fn require_headers(path: &Path, columns: &[&str]) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?;
    match columns.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        Some(column) => Err(PipelineError::MissingColumn {
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

/// Write `records` with a header row derived from `T`'s field names
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for r in records {
        writer.serialize(r)?;
    }
    writer.flush()?;
    Ok(())
}
