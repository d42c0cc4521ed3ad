//! Result writers.
//!
//! Writers take a slice of results (usually [`ResultSet::results`](crate::results::ResultSet::results))
//! and encode it onto any [`std::io::Write`]. They sort their input by id, so
//! the output is deterministic regardless of collector scheduling.

mod csv;
mod json;

pub use self::csv::{CsvWriter, MutationCsvWriter};
pub use self::json::JsonWriter;

use crate::results::MetricResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    /// One row per attached mutation
    Mutations,
}

pub trait OutputWriter {
    fn write_results(&mut self, results: &[MetricResult]) -> anyhow::Result<()>;
}

pub fn create_writer<'w, W: Write + 'w>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Csv => Box::new(CsvWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Mutations => Box::new(MutationCsvWriter::new(writer)),
    }
}

/// Write `results` to a new file at `path`.
pub fn write_to_file(path: &Path, format: OutputFormat, results: &[MetricResult]) -> anyhow::Result<()> {
    let file = File::create(path).map_err(|e| {
        crate::errors::CovmineError::io("Failed to create output file", path, e)
    })?;
    let mut writer = create_writer(format, BufWriter::new(file));
    writer.write_results(results)?;
    log::debug!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}

/// Results sorted by id
fn sorted(results: &[MetricResult]) -> Vec<&MetricResult> {
    let mut sorted: Vec<&MetricResult> = results.iter().collect();
    sorted.sort_by(|a, b| a.id().cmp(b.id()));
    sorted
}
