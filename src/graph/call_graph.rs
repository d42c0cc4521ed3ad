//! Call multigraph between method-level units.
//!
//! Every call site is kept as its own [`CallEdge`], so two calls from the same
//! test to the same callee count twice for assertion counting while the
//! reachability queries see the callee once. The graph is append-only.

use super::reachability::transitive_closure;
use crate::core::{TestRule, Unit};
use crate::errors::{CovmineError, Result};
use im::{HashMap, OrdSet, Vector};
use std::collections::HashSet;

/// Kind of call recorded by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    InvokeVirtual,
    InvokeSpecial,
    InvokeStatic,
    InvokeInterface,
    InvokeDynamic,
    /// Call found in source by an AST walker
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallEdge {
    pub call_type: CallType,
    pub line_number: u32,
    pub caller: Unit,
    pub callee: Unit,
}

impl CallEdge {
    pub fn new(call_type: CallType, line_number: u32, caller: Unit, callee: Unit) -> Self {
        Self {
            call_type,
            line_number,
            caller,
            callee,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    units: OrdSet<Unit>,
    edges: Vector<CallEdge>,
    out_index: HashMap<Unit, Vector<usize>>,
    callee_index: HashMap<Unit, OrdSet<Unit>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from front-end output, rejecting edges whose endpoints
    /// are not among `units`. No partial graph is returned on failure.
    pub fn from_parts<U, E>(units: U, edges: E) -> Result<Self>
    where
        U: IntoIterator<Item = Unit>,
        E: IntoIterator<Item = CallEdge>,
    {
        let mut graph = Self::new();
        for unit in units {
            graph.add_unit(unit);
        }

        for edge in edges {
            if !graph.contains(&edge.caller) {
                return Err(CovmineError::malformed(
                    edge.caller.fqn(),
                    format!("call edge caller (line {})", edge.line_number),
                ));
            }
            if !graph.contains(&edge.callee) {
                return Err(CovmineError::malformed(
                    edge.callee.fqn(),
                    format!("call edge callee (line {})", edge.line_number),
                ));
            }
            graph.add_edge(edge);
        }

        Ok(graph)
    }

    /// Register a unit. Units without edges still count as part of the
    /// production universe.
    pub fn add_unit(&mut self, unit: Unit) {
        self.units.insert(unit);
    }

    /// Append an edge, registering both endpoints.
    pub fn add_edge(&mut self, edge: CallEdge) {
        let caller = edge.caller.clone();
        let callee = edge.callee.clone();
        let position = self.edges.len();

        self.units.insert(caller.clone());
        self.units.insert(callee.clone());
        self.edges.push_back(edge);

        self.out_index
            .entry(caller.clone())
            .or_default()
            .push_back(position);
        self.callee_index.entry(caller).or_default().insert(callee);
    }

    pub fn contains(&self, unit: &Unit) -> bool {
        self.units.contains(unit)
    }

    /// Registered units in FQN order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.edges.iter()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges whose caller is `unit`, in insertion order.
    pub fn out_edges<'a>(&'a self, unit: &Unit) -> impl Iterator<Item = &'a CallEdge> + 'a {
        self.out_index
            .get(unit)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter_map(move |position| self.edges.get(position))
    }

    /// Distinct callees of `unit`
    pub fn callees(&self, unit: &Unit) -> Vec<Unit> {
        self.callee_index
            .get(unit)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Registered units that the rule identifies as tests, in FQN order.
    /// Tests without outgoing calls are included.
    pub fn test_nodes(&self, rule: &TestRule) -> Vec<Unit> {
        self.units
            .iter()
            .filter(|unit| rule.is_test(unit))
            .cloned()
            .collect()
    }

    /// Registered units that are not tests
    pub fn production_units(&self, rule: &TestRule) -> HashSet<Unit> {
        self.units
            .iter()
            .filter(|unit| rule.is_production(unit))
            .cloned()
            .collect()
    }

    /// Units reachable from `unit` through one or more calls.
    pub fn reachable_from(&self, unit: &Unit) -> HashSet<Unit> {
        transitive_closure(unit, |current| self.callees(current))
    }
}
