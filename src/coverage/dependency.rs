//! Test coverage derived from the unit-level dependency graph.
//!
//! Every test unit with at least one outgoing dependency gets a `dep_tcov`
//! result. The reached set is the cycle-safe transitive closure from the test;
//! the test itself is never counted, even through a self-loop.

use super::{Ratio, DEP_TCOV};
use crate::core::{TestRule, Unit};
use crate::graph::DependencyGraph;
use crate::results::MetricResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Denominator of the dependency coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyDenominator {
    /// All non-test units in the graph
    #[default]
    ProductionUniverse,
    /// Distinct units reachable from the test
    Reachable,
}

/// Whether traversal continues through other test units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestEdgePolicy {
    /// Follow dependencies of reached test units as well
    #[default]
    Traverse,
    /// Reached test units are counted as reached but not expanded
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DependencySettings {
    #[serde(default)]
    pub denominator: DependencyDenominator,
    #[serde(default)]
    pub test_edges: TestEdgePolicy,
}

pub struct DependencyCoverage<'a> {
    graph: &'a DependencyGraph,
    rule: &'a TestRule,
    settings: DependencySettings,
}

impl<'a> DependencyCoverage<'a> {
    pub fn new(graph: &'a DependencyGraph, rule: &'a TestRule) -> Self {
        Self {
            graph,
            rule,
            settings: DependencySettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DependencySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Test units that depend on something, in FQN order
    fn sources(&self) -> Vec<Unit> {
        let mut sources: Vec<Unit> = self
            .graph
            .units()
            .filter(|unit| self.rule.is_test(unit) && self.graph.out_degree(unit) > 0)
            .cloned()
            .collect();
        sources.sort();
        sources
    }

    fn reached_from(&self, source: &Unit) -> HashSet<Unit> {
        match self.settings.test_edges {
            TestEdgePolicy::Traverse => self.graph.reachable_from(source),
            TestEdgePolicy::Stop => self
                .graph
                .reachable_from_with(source, |unit| self.rule.is_production(unit)),
        }
    }

    pub fn ratios(&self) -> Vec<(Unit, Ratio)> {
        let production = self
            .graph
            .units()
            .filter(|unit| self.rule.is_production(unit))
            .count();

        self.sources()
            .into_iter()
            .map(|source| {
                let reached = self.reached_from(&source);
                let covered = reached
                    .iter()
                    .filter(|unit| self.rule.is_production(unit))
                    .count();
                let total = match self.settings.denominator {
                    DependencyDenominator::ProductionUniverse => production,
                    DependencyDenominator::Reachable => reached.len(),
                };
                (source, Ratio::new(covered, total))
            })
            .collect()
    }

    pub fn results(&self) -> Vec<MetricResult> {
        let results: Vec<MetricResult> = self
            .ratios()
            .into_iter()
            .map(|(source, ratio)| {
                MetricResult::with_metric(
                    source.fqn(),
                    source.path_buf(),
                    DEP_TCOV,
                    ratio.to_metric_value(),
                )
            })
            .collect();

        debug!(tests = results.len(), "Dependency coverage computed");
        results
    }
}
