//! Coverage engine.
//!
//! Every coverage metric in this crate is a truncated integer ratio of a
//! covered count to a denominator, computed by [`percentage`]. The collectors
//! differ only in where both numbers come from:
//!
//! - [`call_graph`]: transitive callees of each test in a [`CallGraph`](crate::graph::CallGraph)
//! - [`dependency`]: transitive dependencies in a [`DependencyGraph`](crate::graph::DependencyGraph)
//! - [`direct`]: pre-computed covered sets in [`CoverageData`](crate::data::CoverageData)
//!
//! [`assertions`] shares the traversal shape but reports a raw count.

pub mod assertions;
pub mod call_graph;
pub mod dependency;
pub mod direct;

pub use assertions::AssertionCounter;
pub use call_graph::CallGraphCoverage;
pub use dependency::{DependencyCoverage, DependencyDenominator, DependencySettings, TestEdgePolicy};
pub use direct::DirectCoverage;

use crate::core::Unit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Add;

/// Metric name of the assertion count
pub const NUM_ASSERTS: &str = "num_asserts";
/// Metric name of the dependency-graph coverage
pub const DEP_TCOV: &str = "dep_tcov";

/// `<prefix>_tcov_met`
pub fn method_metric_name(prefix: &str) -> String {
    format!("{prefix}_tcov_met")
}

/// `<prefix>_tcov`
pub fn class_metric_name(prefix: &str) -> String {
    format!("{prefix}_tcov")
}

/// `covered * 100 / total` in integer arithmetic; 0 when `total` is 0.
pub fn percentage(covered: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        covered * 100 / total
    }
}

/// Covered count over denominator, before truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ratio {
    pub covered: u64,
    pub total: u64,
}

impl Ratio {
    pub fn new(covered: usize, total: usize) -> Self {
        Self {
            covered: covered as u64,
            total: total as u64,
        }
    }

    pub fn percentage(&self) -> u64 {
        percentage(self.covered, self.total)
    }

    /// Percentage as written into a metric value
    pub fn to_metric_value(&self) -> String {
        self.percentage().to_string()
    }
}

impl Add for Ratio {
    type Output = Ratio;

    fn add(self, other: Ratio) -> Ratio {
        Ratio {
            covered: self.covered + other.covered,
            total: self.total + other.total,
        }
    }
}

/// How method-level coverage of the tests in one class/module is combined.
///
/// Neither variant averages percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassAggregation {
    /// Size of the union of the covered sets over the universe size
    #[default]
    Union,
    /// Sum of the per-method numerators over the sum of their denominators
    Summed,
}

/// Supplies the denominator for a test (method level) or a test class/module
/// (class level) when the covered sets come from outside the engine.
pub trait DenominatorSupplier: Send + Sync {
    fn denominator(&self, scope: &Unit) -> usize;

    /// Whether `unit` may appear in a covered set at all.
    fn admits(&self, _unit: &Unit) -> bool {
        true
    }
}

/// The same denominator for every scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTotal(pub usize);

impl DenominatorSupplier for FixedTotal {
    fn denominator(&self, _scope: &Unit) -> usize {
        self.0
    }
}

impl<F> DenominatorSupplier for F
where
    F: Fn(&Unit) -> usize + Send + Sync,
{
    fn denominator(&self, scope: &Unit) -> usize {
        self(scope)
    }
}

/// Explicit set of production units used as coverage denominator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageUniverse {
    units: HashSet<Unit>,
}

impl CoverageUniverse {
    pub fn new<I>(units: I) -> Self
    where
        I: IntoIterator<Item = Unit>,
    {
        Self {
            units: units.into_iter().collect(),
        }
    }

    pub fn contains(&self, unit: &Unit) -> bool {
        self.units.contains(unit)
    }

    pub fn units(&self) -> &HashSet<Unit> {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl DenominatorSupplier for CoverageUniverse {
    fn denominator(&self, _scope: &Unit) -> usize {
        self.units.len()
    }

    fn admits(&self, unit: &Unit) -> bool {
        self.units.contains(unit)
    }
}

/// Denominator source for call-graph coverage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Universe<'a> {
    /// Every registered unit of the graph that is not a test
    #[default]
    GraphProduction,
    /// A production set supplied by the front end
    Explicit(&'a CoverageUniverse),
}
