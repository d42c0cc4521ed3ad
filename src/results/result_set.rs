//! Merge-on-insert collection of all results of a run.
//!
//! At most one [`MetricResult`] exists per id. Adding a result with a known id
//! folds its metrics into the existing one, which is what lets independent
//! collectors fill disjoint metric columns of the same unit.

use super::metric_result::MetricResult;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    results: HashMap<String, MetricResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: MetricResult) {
        match self.results.get_mut(result.id()) {
            Some(existing) => {
                trace!(id = result.id(), "merging into existing result");
                existing.merge(result);
            }
            None => {
                self.results.insert(result.id().to_string(), result);
            }
        }
    }

    pub fn add_results<I>(&mut self, results: I)
    where
        I: IntoIterator<Item = MetricResult>,
    {
        for result in results {
            self.add_result(result);
        }
    }

    pub fn get(&self, id: &str) -> Option<&MetricResult> {
        self.results.get(id)
    }

    /// Snapshot of all results, sorted by id.
    pub fn results(&self) -> Vec<MetricResult> {
        let mut snapshot: Vec<MetricResult> = self.results.values().cloned().collect();
        snapshot.sort_by(|a, b| a.id().cmp(b.id()));
        snapshot
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FromIterator<MetricResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = MetricResult>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        set.add_results(iter);
        set
    }
}

/// A [`ResultSet`] shared between collectors running on separate threads.
///
/// Each `add_results` call holds the lock for the whole read-merge-write, so
/// one collector's batch is never interleaved with another's.
#[derive(Debug, Clone, Default)]
pub struct SharedResultSet {
    inner: Arc<Mutex<ResultSet>>,
}

impl SharedResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_results<I>(&self, results: I)
    where
        I: IntoIterator<Item = MetricResult>,
    {
        self.inner.lock().add_results(results);
    }

    pub fn results(&self) -> Vec<MetricResult> {
        self.inner.lock().results()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ResultSet {
        self.inner.lock().clone()
    }
}
