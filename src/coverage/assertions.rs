//! Assertion counting over the call graph.
//!
//! Counts the outgoing call edges of each test whose callee FQN contains the
//! assertion marker. Every call site counts, so two `assertEquals` calls in one
//! test count twice. Counts are added up per result id, which makes the
//! class-level count the sum of the method-level counts of its tests.

use super::NUM_ASSERTS;
use crate::core::{Granularity, TestRule, Unit};
use crate::graph::CallGraph;
use crate::results::MetricResult;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Default marker identifying assertion calls
pub const DEFAULT_ASSERTION_MARKER: &str = "assert";

pub struct AssertionCounter<'a> {
    graph: &'a CallGraph,
    rule: &'a TestRule,
    marker: String,
}

impl<'a> AssertionCounter<'a> {
    pub fn new(graph: &'a CallGraph, rule: &'a TestRule) -> Self {
        Self {
            graph,
            rule,
            marker: DEFAULT_ASSERTION_MARKER.to_string(),
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Assertion calls made directly by `test`
    pub fn count_for(&self, test: &Unit) -> u64 {
        self.graph
            .out_edges(test)
            .filter(|edge| edge.callee.fqn().contains(self.marker.as_str()))
            .count() as u64
    }

    /// Counts per result id at the requested granularity, sorted by id.
    pub fn counts(&self, granularity: Granularity) -> BTreeMap<String, (Option<PathBuf>, u64)> {
        let mut counts: BTreeMap<String, (Option<PathBuf>, u64)> = BTreeMap::new();

        for test in self.graph.test_nodes(self.rule) {
            let target = test.at(granularity);
            let entry = counts
                .entry(target.fqn().to_string())
                .or_insert_with(|| (target.path_buf(), 0));
            entry.1 += self.count_for(&test);
        }

        counts
    }

    pub fn method_level(&self) -> Vec<MetricResult> {
        self.results(Granularity::Method)
    }

    pub fn class_level(&self) -> Vec<MetricResult> {
        self.results(Granularity::Class)
    }

    fn results(&self, granularity: Granularity) -> Vec<MetricResult> {
        let results: Vec<MetricResult> = self
            .counts(granularity)
            .into_iter()
            .map(|(id, (path, count))| {
                MetricResult::with_metric(id, path, NUM_ASSERTS, count.to_string())
            })
            .collect();

        debug!(units = results.len(), %granularity, "Assertions counted");
        results
    }
}
