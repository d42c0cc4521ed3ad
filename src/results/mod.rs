//! Result model and merge semantics.

pub mod metric_result;
pub mod result_set;

pub use metric_result::{MetricResult, Mutation};
pub use result_set::{ResultSet, SharedResultSet};
