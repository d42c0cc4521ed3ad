//! Core identity types shared by graphs, coverage data and collectors.

pub mod test_rule;
pub mod unit;

pub use test_rule::TestRule;
pub use unit::{Granularity, NamingScheme, SplitPoint, Unit, UnitFactory};
