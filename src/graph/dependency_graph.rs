//! Unit-level dependency graph.
//!
//! An edge `from -> to` means "`from` depends on `to`". The graph is simple:
//! putting the same edge twice keeps one edge. Self-loops are stored but never
//! contribute to reachability.

use super::reachability::{transitive_closure, transitive_closure_with};
use crate::core::Unit;
use crate::errors::{CovmineError, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<Unit, ()>,
    node_map: HashMap<Unit, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from front-end output, rejecting edges whose endpoints
    /// are not among `units`.
    pub fn from_edges<U, E>(units: U, edges: E) -> Result<Self>
    where
        U: IntoIterator<Item = Unit>,
        E: IntoIterator<Item = (Unit, Unit)>,
    {
        let mut graph = Self::new();
        for unit in units {
            graph.add_unit(unit);
        }

        for (from, to) in edges {
            if !graph.contains(&from) {
                return Err(CovmineError::malformed(from.fqn(), "dependency edge source"));
            }
            if !graph.contains(&to) {
                return Err(CovmineError::malformed(to.fqn(), "dependency edge target"));
            }
            graph.put_edge(from, to);
        }

        Ok(graph)
    }

    /// Register a unit, returning its node.
    pub fn add_unit(&mut self, unit: Unit) -> NodeIndex {
        if let Some(&node) = self.node_map.get(&unit) {
            return node;
        }
        let node = self.graph.add_node(unit.clone());
        self.node_map.insert(unit, node);
        node
    }

    /// Insert `from -> to`, registering both endpoints. Duplicate edges collapse.
    pub fn put_edge(&mut self, from: Unit, to: Unit) {
        let from_node = self.add_unit(from);
        let to_node = self.add_unit(to);
        self.graph.update_edge(from_node, to_node, ());
    }

    pub fn contains(&self, unit: &Unit) -> bool {
        self.node_map.contains_key(unit)
    }

    pub fn has_edge(&self, from: &Unit, to: &Unit) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn unit_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Registered units, in insertion order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.graph.node_indices().map(move |node| &self.graph[node])
    }

    /// Direct dependencies of `unit` (including itself when it has a self-loop)
    pub fn successors(&self, unit: &Unit) -> Vec<Unit> {
        self.node_map
            .get(unit)
            .map(|&node| {
                self.graph
                    .neighbors(node)
                    .map(|next| self.graph[next].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn out_degree(&self, unit: &Unit) -> usize {
        self.node_map
            .get(unit)
            .map(|&node| self.graph.neighbors(node).count())
            .unwrap_or(0)
    }

    /// Units reachable from `unit` in one or more hops.
    pub fn reachable_from(&self, unit: &Unit) -> HashSet<Unit> {
        transitive_closure(unit, |current| self.successors(current))
    }

    /// Reachability that does not follow the edges of units rejected by `expand`.
    pub fn reachable_from_with<P>(&self, unit: &Unit, expand: P) -> HashSet<Unit>
    where
        P: Fn(&Unit) -> bool,
    {
        transitive_closure_with(unit, |current| self.successors(current), expand)
    }
}
