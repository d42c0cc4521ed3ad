//! Graph stores handed over by the front ends.
//!
//! Both graphs are append-only while a front end builds them and read-only once
//! given to the collectors, so collectors may share them across threads.

pub mod call_graph;
pub mod dependency_graph;
pub mod reachability;

pub use call_graph::{CallEdge, CallGraph, CallType};
pub use dependency_graph::DependencyGraph;
pub use reachability::{transitive_closure, transitive_closure_with};
