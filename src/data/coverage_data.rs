//! Direct coverage facts from an external coverage trace.
//!
//! Maps every test method to the set of units it executed. A second map is
//! kept in step at class/module level: every insertion unions the covered set
//! into the entry of the test's enclosing unit.

use crate::core::Unit;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct CoverageData {
    method_level: HashMap<Unit, HashSet<Unit>>,
    class_level: HashMap<Unit, HashSet<Unit>>,
}

impl CoverageData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the units covered by `test`.
    ///
    /// A second `add` for the same test replaces its method-level entry; the
    /// class-level entry only ever grows.
    pub fn add<I>(&mut self, test: Unit, covered: I)
    where
        I: IntoIterator<Item = Unit>,
    {
        let covered: HashSet<Unit> = covered.into_iter().collect();

        self.class_level
            .entry(test.enclosing_unit())
            .or_default()
            .extend(covered.iter().cloned());

        self.method_level.insert(test, covered);
    }

    pub fn method_level(&self) -> &HashMap<Unit, HashSet<Unit>> {
        &self.method_level
    }

    pub fn class_level(&self) -> &HashMap<Unit, HashSet<Unit>> {
        &self.class_level
    }

    /// Covered set of a test method, if recorded
    pub fn covered_by(&self, test: &Unit) -> Option<&HashSet<Unit>> {
        self.method_level.get(test)
    }

    pub fn len(&self) -> usize {
        self.method_level.len()
    }

    pub fn is_empty(&self) -> bool {
        self.method_level.is_empty()
    }
}
