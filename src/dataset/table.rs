//! In-memory string table with header-name lookups.

use crate::error::{PipelineError, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Cell spellings treated as missing
const MISSING_MARKERS: [&str; 5] = ["", "NA", "N/A", "NaN", "null"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
    /// Every cell missing
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn read_csv(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(r);
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| PipelineError::MissingColumn {
            column: name.to_string(),
        })
    }

    /// Cells of one column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.require_column(name)?;
        Ok(self
            .rows
            .iter()
            .map(|r| r.get(idx).map(String::as_str).unwrap_or(""))
            .collect())
    }

    /// Non-missing cells of a column parsed as numbers; `None` if any present cell is not numeric
    pub fn numeric_column(&self, name: &str) -> Result<Option<Vec<f64>>> {
        let mut out = Vec::new();
        for cell in self.column(name)? {
            if is_missing(cell) {
                continue;
            }
            match cell.trim().parse::<f64>() {
                Ok(v) => out.push(v),
                Err(_) => return Ok(None),
            }
        }
        Ok(Some(out))
    }

    pub fn column_kind(&self, name: &str) -> Result<ColumnKind> {
        let mut kind = ColumnKind::Empty;
        for cell in self.column(name)? {
            if is_missing(cell) {
                continue;
            }
            let cell = cell.trim();
            let this = if cell.parse::<i64>().is_ok() {
                ColumnKind::Integer
            } else if cell.parse::<f64>().is_ok() {
                ColumnKind::Float
            } else {
                return Ok(ColumnKind::Text);
            };
            kind = match (kind, this) {
                (ColumnKind::Float, _) | (_, ColumnKind::Float) => ColumnKind::Float,
                _ => ColumnKind::Integer,
            };
        }
        Ok(kind)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

pub fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_reader("a,b,c\n1,x,2.5\n2,,3\n,y,NaN\n".as_bytes()).unwrap()
    }

    #[test]
    fn reads_headers_and_rows() {
        let t = sample();
        assert_eq!(t.shape(), (3, 3));
        assert_eq!(t.column("b").unwrap(), vec!["x", "", "y"]);
    }

    #[test]
    fn infers_column_kinds() {
        let t = sample();
        assert_eq!(t.column_kind("a").unwrap(), ColumnKind::Integer);
        assert_eq!(t.column_kind("b").unwrap(), ColumnKind::Text);
        assert_eq!(t.column_kind("c").unwrap(), ColumnKind::Float);
    }

    #[test]
    fn numeric_column_skips_missing() {
        let t = sample();
        assert_eq!(t.numeric_column("c").unwrap(), Some(vec![2.5, 3.0]));
        assert_eq!(t.numeric_column("b").unwrap(), None);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let t = sample();
        assert!(matches!(
            t.column("zzz"),
            Err(PipelineError::MissingColumn { .. })
        ));
    }

    #[test]
    fn csv_write_then_read_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let t = sample();
        t.write_csv(&path).unwrap();
        assert_eq!(Table::read_csv(&path).unwrap(), t);
    }
}
