//! Cycle-safe transitive reachability shared by both graph kinds.
//!
//! Reachability here means "one or more hops": the start node is never part of
//! the result, not even when a cycle (or a self-loop) leads back to it. Every
//! node is visited at most once, so each query is O(V + E).

use im::Vector;
use std::collections::HashSet;
use std::hash::Hash;

/// All nodes reachable from `start` through `successors`.
pub fn transitive_closure<N, I, F>(start: &N, successors: F) -> HashSet<N>
where
    N: Clone + Eq + Hash,
    I: IntoIterator<Item = N>,
    F: FnMut(&N) -> I,
{
    transitive_closure_with(start, successors, |_| true)
}

/// Like [`transitive_closure`], but nodes for which `expand` returns false are
/// recorded as reached without following their outgoing edges. The start node
/// is always expanded.
pub fn transitive_closure_with<N, I, F, P>(start: &N, mut successors: F, expand: P) -> HashSet<N>
where
    N: Clone + Eq + Hash,
    I: IntoIterator<Item = N>,
    F: FnMut(&N) -> I,
    P: Fn(&N) -> bool,
{
    let mut visited: HashSet<N> = HashSet::new();
    let mut to_visit = Vector::new();
    to_visit.push_back(start.clone());
    let mut first = true;

    while let Some(current) = to_visit.pop_front() {
        if !first && !expand(&current) {
            continue;
        }
        first = false;

        for next in successors(&current) {
            if visited.insert(next.clone()) {
                to_visit.push_back(next);
            }
        }
    }

    visited.remove(start);
    visited
}
