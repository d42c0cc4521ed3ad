//! Per-unit metric record and its mutation-testing companion rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One mutation-testing outcome attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mutation {
    pub location: String,
    pub m_type: String,
    pub line_number: u32,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

impl Mutation {
    pub fn new(
        location: impl Into<String>,
        m_type: impl Into<String>,
        line_number: u32,
        result: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            m_type: m_type.into(),
            line_number,
            result: result.into(),
            classification: None,
        }
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }
}

/// Canonical metric record for one unit id.
///
/// Metric values are kept as strings, the way they are written out. Equality
/// compares id, path and the whole metric map; mutations are companion data
/// and do not take part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricResult {
    id: String,
    path: Option<PathBuf>,
    metrics: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    mutations: Vec<Mutation>,
}

impl MetricResult {
    pub fn new(id: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path,
            metrics: BTreeMap::new(),
            mutations: Vec::new(),
        }
    }

    /// Result carrying a single metric
    pub fn with_metric(
        id: impl Into<String>,
        path: Option<PathBuf>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut result = Self::new(id, path);
        result.add_metric(name, value);
        result
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn metrics(&self) -> &BTreeMap<String, String> {
        &self.metrics
    }

    pub fn metric(&self, name: &str) -> Option<&str> {
        self.metrics.get(name).map(String::as_str)
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Set a metric, replacing any previous value under the same name.
    pub fn add_metric(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.metrics.insert(name.into(), value.into());
    }

    /// Attach a mutation unless an identical one is already present.
    pub fn add_mutation(&mut self, mutation: Mutation) {
        if !self.mutations.contains(&mutation) {
            self.mutations.push(mutation);
        }
    }

    /// Fold `other` into this result: incoming metrics overwrite, everything
    /// else is kept. The path is only adopted when this result has none.
    pub fn merge(&mut self, other: MetricResult) {
        if self.path.is_none() {
            self.path = other.path;
        }
        self.metrics.extend(other.metrics);
        for mutation in other.mutations {
            self.add_mutation(mutation);
        }
    }
}

impl PartialEq for MetricResult {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.path == other.path && self.metrics == other.metrics
    }
}

impl Eq for MetricResult {}
