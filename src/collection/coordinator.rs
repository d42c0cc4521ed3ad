//! Concurrent collector execution.
//!
//! Every planned collector runs on the rayon pool against borrowed, read-only
//! inputs. A collector computes its complete output before anything is merged,
//! so a failing collector leaves no partial entries behind and never disturbs
//! the results merged by the others.

use super::registry::{CollectorKind, CollectorPlan, CollectorRegistry};
use crate::config::MetricsConfig;
use crate::core::{Granularity, TestRule};
use crate::coverage::{
    AssertionCounter, CallGraphCoverage, CoverageUniverse, DependencyCoverage, DirectCoverage,
    Universe,
};
use crate::data::CoverageData;
use crate::errors::{CovmineError, Result};
use crate::graph::{CallGraph, DependencyGraph};
use crate::observability::{current_context, set_granularity, set_phase, CollectorPhase};
use crate::results::{MetricResult, SharedResultSet};
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

/// Inputs handed to the collectors; a collector whose input is absent is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectorInputs<'a> {
    pub call_graph: Option<&'a CallGraph>,
    pub dependency_graph: Option<&'a DependencyGraph>,
    pub coverage_data: Option<&'a CoverageData>,
    /// Production units used as denominator by the direct and call-graph coverage
    pub universe: Option<&'a CoverageUniverse>,
}

impl<'a> CollectorInputs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call_graph(mut self, graph: &'a CallGraph) -> Self {
        self.call_graph = Some(graph);
        self
    }

    pub fn with_dependency_graph(mut self, graph: &'a DependencyGraph) -> Self {
        self.dependency_graph = Some(graph);
        self
    }

    pub fn with_coverage_data(mut self, data: &'a CoverageData) -> Self {
        self.coverage_data = Some(data);
        self
    }

    pub fn with_universe(mut self, universe: &'a CoverageUniverse) -> Self {
        self.universe = Some(universe);
        self
    }
}

/// Outcome of one [`Coordinator::run`]
#[derive(Debug, Default)]
pub struct RunReport {
    /// Plans that merged their results, with the number of results merged
    pub completed: Vec<(CollectorPlan, usize)>,
    /// Plans whose input was not supplied
    pub skipped: Vec<CollectorPlan>,
    pub failed: Vec<(CollectorPlan, CovmineError)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_merged(&self) -> usize {
        self.completed.iter().map(|(_, count)| count).sum()
    }
}

enum Outcome {
    Completed(usize),
    Skipped,
    Failed(CovmineError),
}

pub struct Coordinator {
    config: MetricsConfig,
    rule: TestRule,
    marker: String,
    registry: CollectorRegistry,
}

impl Coordinator {
    pub fn new(config: MetricsConfig) -> Result<Self> {
        let _phase = set_phase(CollectorPhase::Planning);
        config.validate()?;

        let rule = config.test_rule()?;
        let marker = config.profile().assertion_marker;
        let registry = CollectorRegistry::from_config(&config);
        Ok(Self {
            config,
            rule,
            marker,
            registry,
        })
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn test_rule(&self) -> &TestRule {
        &self.rule
    }

    pub fn registry(&self) -> &CollectorRegistry {
        &self.registry
    }

    /// Run every planned collector and merge successful output into `shared`.
    pub fn run(&self, inputs: &CollectorInputs<'_>, shared: &SharedResultSet) -> RunReport {
        info!(collectors = self.registry.len(), "Running collectors");

        let outcomes: Vec<(CollectorPlan, Outcome)> = self
            .registry
            .plans()
            .par_iter()
            .map(|plan| (*plan, self.run_plan(*plan, inputs, shared)))
            .collect();

        let report = outcomes.into_iter().fold(
            RunReport::default(),
            |mut report, (plan, outcome)| {
                match outcome {
                    Outcome::Completed(count) => report.completed.push((plan, count)),
                    Outcome::Skipped => report.skipped.push(plan),
                    Outcome::Failed(err) => report.failed.push((plan, err)),
                }
                report
            },
        );

        info!(
            completed = report.completed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Collectors finished"
        );
        report
    }

    fn run_plan(
        &self,
        plan: CollectorPlan,
        inputs: &CollectorInputs<'_>,
        shared: &SharedResultSet,
    ) -> Outcome {
        let span = info_span!("collector", kind = %plan.kind, granularity = %plan.granularity);
        let _enter = span.enter();

        match self.collect(plan, inputs) {
            Ok(Some(results)) => {
                let _phase = set_phase(CollectorPhase::Merging);
                let count = results.len();
                shared.add_results(results);
                debug!(results = count, "Collector merged");
                Outcome::Completed(count)
            }
            Ok(None) => {
                debug!("Collector input missing, skipped");
                Outcome::Skipped
            }
            Err(err) => Outcome::Failed(err),
        }
    }

    /// Compute one plan's output without merging it. `None` when its input is absent.
    ///
    /// Errors are tagged with the collector phase they were raised in.
    pub fn collect(
        &self,
        plan: CollectorPlan,
        inputs: &CollectorInputs<'_>,
    ) -> Result<Option<Vec<MetricResult>>> {
        let _phase = set_phase(CollectorPhase::Collecting(plan.kind));
        let _level = set_granularity(plan.granularity);

        self.compute(plan, inputs).map_err(|err| {
            let context = current_context();
            warn!(%context, code = %err.code(), error = %err, "Collector failed");
            err.in_context(context)
        })
    }

    fn compute(
        &self,
        plan: CollectorPlan,
        inputs: &CollectorInputs<'_>,
    ) -> Result<Option<Vec<MetricResult>>> {
        let granularity = plan.granularity;

        match plan.kind {
            CollectorKind::NumAssertions => Ok(inputs.call_graph.map(|graph| {
                let counter =
                    AssertionCounter::new(graph, &self.rule).with_marker(self.marker.as_str());
                match granularity {
                    Granularity::Method => counter.method_level(),
                    Granularity::Class => counter.class_level(),
                }
            })),
            CollectorKind::CallGraphCoverage => Ok(inputs.call_graph.map(|graph| {
                let universe = inputs
                    .universe
                    .map_or(Universe::GraphProduction, Universe::Explicit);
                let coverage =
                    CallGraphCoverage::new(graph, &self.rule, self.config.prefixes.call.as_str())
                        .with_universe(universe)
                        .with_aggregation(self.config.class_aggregation);
                match granularity {
                    Granularity::Method => coverage.method_level(),
                    Granularity::Class => coverage.class_level(),
                }
            })),
            CollectorKind::DirectCoverage => {
                let (Some(data), Some(universe)) = (inputs.coverage_data, inputs.universe) else {
                    return Ok(None);
                };
                let coverage = DirectCoverage::new(data, self.config.prefixes.coverage.as_str());
                let results = match granularity {
                    Granularity::Method => coverage.method_level(universe)?,
                    Granularity::Class => coverage.class_level(universe)?,
                };
                Ok(Some(results))
            }
            CollectorKind::DependencyCoverage => Ok(inputs.dependency_graph.map(|graph| {
                DependencyCoverage::new(graph, &self.rule)
                    .with_settings(self.config.dependency)
                    .results()
            })),
        }
    }
}
