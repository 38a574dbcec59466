//! JSON log lines: one JSON object per line (ndjson) for stage audit.

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Outcome of one pipeline stage, printed after the stage completes
#[derive(Debug, Serialize)]
pub struct StageSummary<'a> {
    pub stage: &'a str,
    pub rows: usize,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> StageSummary<'a> {
    pub fn new(stage: &'a str, rows: usize, columns: usize) -> Self {
        Self {
            stage,
            rows,
            columns,
            output: None,
            error: None,
        }
    }

    pub fn with_output(mut self, path: &Path) -> Self {
        self.output = Some(path.display().to_string());
        self
    }

    pub fn failed(stage: &'a str, error: impl ToString) -> Self {
        Self {
            stage,
            rows: 0,
            columns: 0,
            output: None,
            error: Some(error.to_string()),
        }
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber: JSON lines or plain text to stdout, level from RUST_LOG or default.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stdout);
            tracing_subscriber::registry().with(filter).with(fmt).init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
                .init();
        }
    }

    /// Emit a single structured line (e.g. a stage summary) without going through tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(w, "{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_one_json_line() {
        let mut buf = Vec::new();
        let s = StageSummary::new("split", 80, 20).with_output(Path::new("out/06_train_df.csv"));
        StructuredLogger::emit_json(&s, &mut buf);
        let line = String::from_utf8(buf).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.lines().count(), 1);
        let v: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(v["stage"], "split");
        assert_eq!(v["rows"], 80);
        assert!(v.get("error").is_none());
    }
}
