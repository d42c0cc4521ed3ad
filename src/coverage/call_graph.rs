//! Test coverage derived from the call graph.
//!
//! A test covers every production unit it reaches through one or more calls.
//! At method level each test gets `covered / |universe|`. At class level the
//! tests are first projected onto their enclosing class/module and combined
//! according to [`ClassAggregation`].

use super::{
    class_metric_name, method_metric_name, ClassAggregation, Ratio, Universe,
};
use crate::core::{TestRule, Unit};
use crate::graph::CallGraph;
use crate::results::MetricResult;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

pub struct CallGraphCoverage<'a> {
    graph: &'a CallGraph,
    rule: &'a TestRule,
    prefix: String,
    universe: Universe<'a>,
    aggregation: ClassAggregation,
}

impl<'a> CallGraphCoverage<'a> {
    pub fn new(graph: &'a CallGraph, rule: &'a TestRule, prefix: impl Into<String>) -> Self {
        Self {
            graph,
            rule,
            prefix: prefix.into(),
            universe: Universe::default(),
            aggregation: ClassAggregation::default(),
        }
    }

    pub fn with_universe(mut self, universe: Universe<'a>) -> Self {
        self.universe = universe;
        self
    }

    pub fn with_aggregation(mut self, aggregation: ClassAggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    fn universe_units(&self) -> Cow<'a, HashSet<Unit>> {
        match self.universe {
            Universe::GraphProduction => Cow::Owned(self.graph.production_units(self.rule)),
            Universe::Explicit(universe) => Cow::Borrowed(universe.units()),
        }
    }

    fn covered_by(&self, test: &Unit, universe: &HashSet<Unit>) -> HashSet<Unit> {
        self.graph
            .reachable_from(test)
            .into_iter()
            .filter(|unit| universe.contains(unit))
            .collect()
    }

    /// Covered set and ratio for every test node, in FQN order.
    fn method_coverage(&self, universe: &HashSet<Unit>) -> Vec<(Unit, HashSet<Unit>, Ratio)> {
        self.graph
            .test_nodes(self.rule)
            .into_iter()
            .map(|test| {
                let covered = self.covered_by(&test, universe);
                let ratio = Ratio::new(covered.len(), universe.len());
                (test, covered, ratio)
            })
            .collect()
    }

    /// Per-test ratios at method level
    pub fn method_ratios(&self) -> Vec<(Unit, Ratio)> {
        let universe = self.universe_units();
        self.method_coverage(&universe)
            .into_iter()
            .map(|(test, _, ratio)| (test, ratio))
            .collect()
    }

    /// Per-class ratios, keyed by the enclosing unit of the tests
    pub fn class_ratios(&self) -> BTreeMap<Unit, Ratio> {
        let universe = self.universe_units();
        let per_method = self.method_coverage(&universe);

        match self.aggregation {
            ClassAggregation::Summed => {
                per_method
                    .into_iter()
                    .fold(BTreeMap::new(), |mut acc, (test, _, ratio)| {
                        let entry: &mut Ratio = acc.entry(test.enclosing_unit()).or_default();
                        *entry = *entry + ratio;
                        acc
                    })
            }
            ClassAggregation::Union => {
                let mut covered: BTreeMap<Unit, HashSet<Unit>> = BTreeMap::new();
                for (test, reached, _) in per_method {
                    covered
                        .entry(test.enclosing_unit())
                        .or_default()
                        .extend(reached);
                }
                covered
                    .into_iter()
                    .map(|(class, reached)| (class, Ratio::new(reached.len(), universe.len())))
                    .collect()
            }
        }
    }

    /// One `<prefix>_tcov_met` result per test node
    pub fn method_level(&self) -> Vec<MetricResult> {
        let metric = method_metric_name(&self.prefix);
        let results: Vec<MetricResult> = self
            .method_ratios()
            .into_iter()
            .map(|(test, ratio)| {
                MetricResult::with_metric(
                    test.fqn(),
                    test.path_buf(),
                    metric.as_str(),
                    ratio.to_metric_value(),
                )
            })
            .collect();

        debug!(tests = results.len(), metric = %metric, "Call graph coverage computed");
        results
    }

    /// One `<prefix>_tcov` result per class/module containing tests
    pub fn class_level(&self) -> Vec<MetricResult> {
        let metric = class_metric_name(&self.prefix);
        let results: Vec<MetricResult> = self
            .class_ratios()
            .into_iter()
            .map(|(class, ratio)| {
                MetricResult::with_metric(
                    class.fqn(),
                    class.path_buf(),
                    metric.as_str(),
                    ratio.to_metric_value(),
                )
            })
            .collect();

        debug!(classes = results.len(), metric = %metric, "Call graph coverage computed");
        results
    }
}
