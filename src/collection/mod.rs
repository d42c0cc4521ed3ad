//! Collector selection and execution.
//!
//! [`CollectorRegistry`] turns a [`MetricsConfig`](crate::config::MetricsConfig)
//! into a list of [`CollectorPlan`]s; [`Coordinator`] runs them concurrently
//! and merges their output into a [`SharedResultSet`](crate::results::SharedResultSet).
//!
//! ```
//! use covmine::collection::{CollectorInputs, Coordinator};
//! use covmine::config::MetricsConfig;
//! use covmine::graph::DependencyGraph;
//! use covmine::core::Unit;
//! use covmine::results::SharedResultSet;
//!
//! let mut deps = DependencyGraph::new();
//! deps.put_edge(Unit::class("org.foo.Test1", None), Unit::class("org.foo.C1", None));
//!
//! let coordinator = Coordinator::new(MetricsConfig::default()).unwrap();
//! let shared = SharedResultSet::new();
//! let report = coordinator.run(&CollectorInputs::new().with_dependency_graph(&deps), &shared);
//!
//! assert!(report.is_success());
//! assert_eq!(shared.results()[0].metric("dep_tcov"), Some("100"));
//! ```

mod coordinator;
mod registry;

pub use coordinator::{CollectorInputs, Coordinator, RunReport};
pub use registry::{CollectorKind, CollectorPlan, CollectorRegistry};
