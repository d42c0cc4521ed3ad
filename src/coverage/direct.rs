//! Test coverage from pre-computed covered sets.
//!
//! No traversal happens here: the numerator is the size of the covered set
//! recorded in [`CoverageData`], the denominator comes from a
//! [`DenominatorSupplier`]. Given the same covered sets and totals, this path
//! and [`CallGraphCoverage`](super::CallGraphCoverage) produce identical values.

use super::{class_metric_name, method_metric_name, DenominatorSupplier, Ratio};
use crate::core::Unit;
use crate::data::CoverageData;
use crate::errors::{CovmineError, Result};
use crate::results::MetricResult;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub struct DirectCoverage<'a> {
    data: &'a CoverageData,
    prefix: String,
}

impl<'a> DirectCoverage<'a> {
    pub fn new(data: &'a CoverageData, prefix: impl Into<String>) -> Self {
        Self {
            data,
            prefix: prefix.into(),
        }
    }

    /// One `<prefix>_tcov_met` result per test method
    pub fn method_level(&self, totals: &dyn DenominatorSupplier) -> Result<Vec<MetricResult>> {
        let results = Self::compute(
            self.data.method_level(),
            totals,
            &method_metric_name(&self.prefix),
        )?;
        debug!(tests = results.len(), "Direct coverage computed");
        Ok(results)
    }

    /// One `<prefix>_tcov` result per test class/module
    pub fn class_level(&self, totals: &dyn DenominatorSupplier) -> Result<Vec<MetricResult>> {
        let results = Self::compute(
            self.data.class_level(),
            totals,
            &class_metric_name(&self.prefix),
        )?;
        debug!(classes = results.len(), "Direct coverage computed");
        Ok(results)
    }

    /// Ratios for one level, checked against the supplier and sorted by test
    pub fn ratios(
        coverage: &HashMap<Unit, HashSet<Unit>>,
        totals: &dyn DenominatorSupplier,
    ) -> Result<Vec<(Unit, Ratio)>> {
        let mut ratios = coverage
            .iter()
            .map(|(test, covered)| {
                if let Some(stray) = covered.iter().find(|unit| !totals.admits(unit)) {
                    return Err(CovmineError::malformed(
                        stray.fqn(),
                        format!("coverage entry of `{}`", test.fqn()),
                    ));
                }
                Ok((test.clone(), Ratio::new(covered.len(), totals.denominator(test))))
            })
            .collect::<Result<Vec<_>>>()?;

        ratios.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(ratios)
    }

    fn compute(
        coverage: &HashMap<Unit, HashSet<Unit>>,
        totals: &dyn DenominatorSupplier,
        metric: &str,
    ) -> Result<Vec<MetricResult>> {
        Ok(Self::ratios(coverage, totals)?
            .into_iter()
            .map(|(test, ratio)| {
                MetricResult::with_metric(test.fqn(), test.path_buf(), metric, ratio.to_metric_value())
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NamingScheme;
    use crate::coverage::{CoverageUniverse, FixedTotal};

    fn unit(fqn: &str) -> Unit {
        Unit::method(fqn, None, &NamingScheme::jvm())
    }

    #[test]
    fn test_empty_covered_set_is_zero_percent() {
        let mut data = CoverageData::new();
        data.add(unit("a.TestX.t"), Vec::new());

        let results = DirectCoverage::new(&data, "cov")
            .method_level(&FixedTotal(4))
            .unwrap();
        assert_eq!(results[0].metric("cov_tcov_met"), Some("0"));
    }

    #[test]
    fn test_zero_total_is_zero_percent() {
        let mut data = CoverageData::new();
        data.add(unit("a.TestX.t"), [unit("a.C.m")]);

        let results = DirectCoverage::new(&data, "cov")
            .class_level(&FixedTotal(0))
            .unwrap();
        assert_eq!(results[0].id(), "a.TestX");
        assert_eq!(results[0].metric("cov_tcov"), Some("0"));
    }

    #[test]
    fn test_unit_outside_universe_fails_whole_level() {
        let mut data = CoverageData::new();
        data.add(unit("a.TestX.ok"), [unit("a.C.m")]);
        data.add(unit("a.TestX.bad"), [unit("a.C.ghost")]);
        let universe = CoverageUniverse::new([unit("a.C.m")]);

        let err = DirectCoverage::new(&data, "cov")
            .method_level(&universe)
            .unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("a.C.ghost"));
    }

    #[test]
    fn test_per_scope_denominator() {
        let mut data = CoverageData::new();
        data.add(unit("a.TestX.t"), [unit("a.C.m")]);
        data.add(unit("b.TestY.t"), [unit("b.C.m")]);
        let totals = |scope: &Unit| -> usize { if scope.fqn().starts_with("a.") { 2 } else { 4 } };

        let results = DirectCoverage::new(&data, "cov").method_level(&totals).unwrap();
        assert_eq!(results[0].metric("cov_tcov_met"), Some("50"));
        assert_eq!(results[1].metric("cov_tcov_met"), Some("25"));
    }
}
