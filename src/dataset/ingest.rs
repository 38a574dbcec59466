//! Ingestion: raw CSV → ingestion stage file, with a shape/column report.

use super::{is_missing, Table};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use tracing::{debug, info};

pub fn ingest(config: &PipelineConfig) -> Result<Table> {
    let table = Table::read_csv(&config.paths.raw_data)?;
    if table.headers.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }
    let (rows, columns) = table.shape();
    info!(rows, columns, path = %config.paths.raw_data.display(), "loaded raw data");

    for (i, row) in table.head(5).iter().enumerate() {
        debug!(row = i, values = ?row, "head");
    }
    for name in &table.headers {
        let cells = table.column(name)?;
        let non_null = cells.iter().filter(|c| !is_missing(c)).count();
        let kind = table.column_kind(name)?;
        info!(column = %name, non_null, kind = ?kind, "column info");
    }

    let out = config.paths.ingestion();
    table.write_csv(&out)?;
    info!(path = %out.display(), "ingestion written");
    Ok(table)
}
