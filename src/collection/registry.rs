//! Static collector tables.
//!
//! Every collector declares the granularities and languages it supports in
//! a static table. The registry reads the table once per
//! configuration and produces the list of plans to execute.

use crate::config::{Language, MetricsConfig};
use crate::core::Granularity;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorKind {
    /// `num_asserts` from the call graph
    NumAssertions,
    /// `<prefix>_tcov_met` / `<prefix>_tcov` from the call graph
    CallGraphCoverage,
    /// `<prefix>_tcov_met` / `<prefix>_tcov` from pre-computed coverage data
    DirectCoverage,
    /// `dep_tcov` from the dependency graph
    DependencyCoverage,
}

struct CollectorSpec {
    granularities: &'static [Granularity],
    languages: &'static [Language],
}

const BOTH_LEVELS: &[Granularity] = &[Granularity::Method, Granularity::Class];
const ALL_LANGUAGES: &[Language] = &[Language::Jvm, Language::Python];

// Indexed in declaration order of `CollectorKind`
static SPECS: [CollectorSpec; 4] = [
    CollectorSpec {
        granularities: BOTH_LEVELS,
        languages: ALL_LANGUAGES,
    },
    CollectorSpec {
        granularities: BOTH_LEVELS,
        languages: ALL_LANGUAGES,
    },
    CollectorSpec {
        granularities: BOTH_LEVELS,
        languages: ALL_LANGUAGES,
    },
    // dependency graphs are built between classes/modules only
    CollectorSpec {
        granularities: &[Granularity::Class],
        languages: ALL_LANGUAGES,
    },
];

impl CollectorKind {
    pub const ALL: [CollectorKind; 4] = [
        CollectorKind::NumAssertions,
        CollectorKind::CallGraphCoverage,
        CollectorKind::DirectCoverage,
        CollectorKind::DependencyCoverage,
    ];

    fn spec(self) -> &'static CollectorSpec {
        match self {
            Self::NumAssertions => &SPECS[0],
            Self::CallGraphCoverage => &SPECS[1],
            Self::DirectCoverage => &SPECS[2],
            Self::DependencyCoverage => &SPECS[3],
        }
    }

    pub fn supports_granularity(self, granularity: Granularity) -> bool {
        self.spec().granularities.contains(&granularity)
    }

    pub fn supports_language(self, language: Language) -> bool {
        self.spec().languages.contains(&language)
    }
}

impl fmt::Display for CollectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NumAssertions => "num_assertions",
            Self::CallGraphCoverage => "call_graph_coverage",
            Self::DirectCoverage => "direct_coverage",
            Self::DependencyCoverage => "dependency_coverage",
        };
        f.write_str(name)
    }
}

/// One collector run at one granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectorPlan {
    pub kind: CollectorKind,
    pub granularity: Granularity,
}

impl fmt::Display for CollectorPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.granularity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectorRegistry {
    plans: Vec<CollectorPlan>,
}

impl CollectorRegistry {
    pub fn from_config(config: &MetricsConfig) -> Self {
        let kinds: &[CollectorKind] = config.collectors.as_deref().unwrap_or(&CollectorKind::ALL);
        let granularities = config.granularities();

        let mut plans: Vec<CollectorPlan> = kinds
            .iter()
            .copied()
            .filter(|kind| kind.supports_language(config.language))
            .flat_map(|kind| {
                granularities
                    .iter()
                    .copied()
                    .filter(move |granularity| kind.supports_granularity(*granularity))
                    .map(move |granularity| CollectorPlan { kind, granularity })
            })
            .collect();
        plans.sort();
        plans.dedup();

        debug!(plans = plans.len(), language = %config.language, "Collector registry built");
        Self { plans }
    }

    pub fn plans(&self) -> &[CollectorPlan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
