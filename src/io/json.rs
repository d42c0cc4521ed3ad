use super::{sorted, OutputWriter};
use crate::errors::CovmineError;
use crate::observability::{current_context, set_phase, CollectorPhase};
use crate::results::MetricResult;
use std::io::Write;

/// Pretty-printed JSON array of results, sorted by id.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, results: &[MetricResult]) -> anyhow::Result<()> {
        let _phase = set_phase(CollectorPhase::Writing);
        let json = serde_json::to_string_pretty(&sorted(results))
            .map_err(|e| CovmineError::from(e).in_context(current_context()))?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
