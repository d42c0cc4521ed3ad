//! Graph-based test metrics for mined repositories.
//!
//! Front ends turn bytecode or source into a [`CallGraph`], a
//! [`DependencyGraph`] or pre-computed [`CoverageData`]. Collectors derive
//! per-test metrics from them (assertion counts and test coverage at method
//! and class/module granularity) and merge everything into one [`ResultSet`]
//! keyed by unit id.
//!
//! ```
//! use covmine::coverage::CallGraphCoverage;
//! use covmine::core::{NamingScheme, TestRule, Unit};
//! use covmine::graph::{CallEdge, CallGraph, CallType};
//!
//! let scheme = NamingScheme::jvm();
//! let test = Unit::method("org.foo.t1.Test1.test1", None, &scheme);
//! let m1 = Unit::method("org.foo.p1.C1.m1", None, &scheme);
//! let m2 = Unit::method("org.foo.p1.C2.m1", None, &scheme);
//!
//! let mut graph = CallGraph::new();
//! graph.add_edge(CallEdge::new(CallType::InvokeVirtual, 12, test, m1.clone()));
//! graph.add_unit(m2);
//!
//! let rule = TestRule::from_patterns([r"(^|\.)Test\w*$"]).unwrap();
//! let results = CallGraphCoverage::new(&graph, &rule, "call").method_level();
//! assert_eq!(results[0].metric("call_tcov_met"), Some("50"));
//! ```

pub mod collection;
pub mod config;
pub mod core;
pub mod coverage;
pub mod data;
pub mod errors;
pub mod graph;
pub mod io;
pub mod observability;
pub mod results;

pub use crate::collection::{CollectorInputs, CollectorKind, Coordinator, RunReport};
pub use crate::config::{load_config, Language, MetricsConfig};
pub use crate::core::{Granularity, NamingScheme, TestRule, Unit, UnitFactory};
pub use crate::coverage::{
    AssertionCounter, CallGraphCoverage, CoverageUniverse, DependencyCoverage, DirectCoverage,
};
pub use crate::data::CoverageData;
pub use crate::errors::{CovmineError, Result};
pub use crate::graph::{CallEdge, CallGraph, CallType, DependencyGraph};
pub use crate::io::{create_writer, OutputFormat, OutputWriter};
pub use crate::results::{MetricResult, Mutation, ResultSet, SharedResultSet};
