use super::{sorted, OutputWriter};
use crate::errors::Result;
use crate::observability::{current_context, set_phase, CollectorPhase};
use crate::results::{MetricResult, Mutation};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// Quote a field when it contains a separator, quote or line break.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn path_field(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

/// One row per result: `id,path,<metric names in sorted order>`.
///
/// A metric missing from a result is written as an empty field.
pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row<'f>(&mut self, fields: impl IntoIterator<Item = &'f str>) -> Result<()> {
        let line: Vec<Cow<'_, str>> = fields.into_iter().map(escape).collect();
        writeln!(self.writer, "{}", line.join(","))?;
        Ok(())
    }

    fn write_rows(&mut self, results: &[MetricResult]) -> Result<()> {
        let names: BTreeSet<&str> = results
            .iter()
            .flat_map(|r| r.metrics().keys().map(String::as_str))
            .collect();

        self.write_row(["id", "path"].into_iter().chain(names.iter().copied()))?;
        for result in sorted(results) {
            let path = path_field(result.path());
            let values = names.iter().map(|name| result.metric(name).unwrap_or(""));
            self.write_row([result.id(), path.as_str()].into_iter().chain(values))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_results(&mut self, results: &[MetricResult]) -> anyhow::Result<()> {
        let _phase = set_phase(CollectorPhase::Writing);
        self.write_rows(results)
            .map_err(|e| e.in_context(current_context()))?;
        Ok(())
    }
}

/// One row per mutation: `id,path,location,m_type,line_number,result`.
///
/// A `classification` column is appended when any mutation carries one. Rows
/// are ordered by result id, then line number.
pub struct MutationCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> MutationCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_rows(&mut self, results: &[MetricResult]) -> Result<()> {
        let classified = results
            .iter()
            .flat_map(MetricResult::mutations)
            .any(|m| m.classification.is_some());

        let mut header = String::from("id,path,location,m_type,line_number,result");
        if classified {
            header.push_str(",classification");
        }
        writeln!(self.writer, "{header}")?;

        for result in sorted(results) {
            let mut mutations: Vec<&Mutation> = result.mutations().iter().collect();
            mutations.sort_by_key(|m| m.line_number);

            let path = path_field(result.path());
            for mutation in mutations {
                let line = mutation.line_number.to_string();
                let mut fields = vec![
                    escape(result.id()),
                    escape(&path),
                    escape(&mutation.location),
                    escape(&mutation.m_type),
                    Cow::Borrowed(line.as_str()),
                    escape(&mutation.result),
                ];
                if classified {
                    fields.push(escape(mutation.classification.as_deref().unwrap_or("")));
                }
                writeln!(self.writer, "{}", fields.join(","))?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MutationCsvWriter<W> {
    fn write_results(&mut self, results: &[MetricResult]) -> anyhow::Result<()> {
        let _phase = set_phase(CollectorPhase::Writing);
        self.write_rows(results)
            .map_err(|e| e.in_context(current_context()))?;
        Ok(())
    }
}
