use crate::graph::{EdgeData, NodeId};
use crate::metaheuristic::Path;

use std::collections::{HashMap, HashSet};

/// Decides when an ant has found what it was looking for.
///
/// A colony asks the session instance for a fresh per-ant instance with `new_ant`, lets
/// every ant walk with its own instance and folds the finished ants back in with `merge`,
/// in the order the ants were started.
pub trait Success<IndexType>: Send {
    /// A fresh instance for the next ant.
    fn new_ant(&self) -> Self
    where
        Self: Sized;

    /// Called once for every edge the ant adds to its path.
    /// Returning true ends the walk successfully.
    fn accept(&mut self, edge: &EdgeData<IndexType>) -> bool;

    fn merge(&mut self, _ant: Self)
    where
        Self: Sized,
    {
    }
}

/// Succeeds as soon as an edge ends at the target node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFound<IndexType> {
    pub target: IndexType,
}

impl<IndexType> TargetFound<IndexType> {
    pub fn new(target: IndexType) -> Self {
        TargetFound { target }
    }
}

impl<IndexType: NodeId> Success<IndexType> for TargetFound<IndexType> {
    fn new_ant(&self) -> Self {
        *self
    }

    fn accept(&mut self, edge: &EdgeData<IndexType>) -> bool {
        edge.to == self.target
    }
}

/// Succeeds when an edge ends at any node of a set and counts how often each one was hit.
#[derive(Debug, Clone)]
pub struct NodeSetFound<'a, IndexType> {
    targets: &'a HashSet<IndexType>,
    hits: HashMap<IndexType, usize>,
}

impl<'a, IndexType: NodeId> NodeSetFound<'a, IndexType> {
    pub fn new(targets: &'a HashSet<IndexType>) -> Self {
        NodeSetFound {
            targets,
            hits: HashMap::new(),
        }
    }

    pub fn hits(&self, target: IndexType) -> usize {
        self.hits.get(&target).copied().unwrap_or(0)
    }
}

impl<'a, IndexType: NodeId> Success<IndexType> for NodeSetFound<'a, IndexType> {
    fn new_ant(&self) -> Self {
        NodeSetFound::new(self.targets)
    }

    fn accept(&mut self, edge: &EdgeData<IndexType>) -> bool {
        if self.targets.contains(&edge.to) {
            *self.hits.entry(edge.to).or_insert(0) += 1;
            true
        } else {
            false
        }
    }

    fn merge(&mut self, ant: Self) {
        for (target, count) in ant.hits {
            *self.hits.entry(target).or_insert(0) += count;
        }
    }
}

/// Succeeds at the target node and records every distinct route that got there.
///
/// Routes are told apart by the sequence of node ids they pass, so an ant rediscovering
/// a known route does not add it a second time.
#[derive(Debug, Clone)]
pub struct UniquePaths<IndexType> {
    target: IndexType,
    current: Path<IndexType>,
    known_routes: HashSet<Vec<IndexType>>,
    successful_paths: Vec<Path<IndexType>>,
}

impl<IndexType: NodeId> UniquePaths<IndexType> {
    pub fn new(target: IndexType) -> Self {
        UniquePaths {
            target,
            current: Path::new(),
            known_routes: HashSet::new(),
            successful_paths: Vec::new(),
        }
    }

    pub fn target(&self) -> IndexType {
        self.target
    }

    pub fn successful_paths(&self) -> &[Path<IndexType>] {
        &self.successful_paths
    }

    pub fn into_successful_paths(self) -> Vec<Path<IndexType>> {
        self.successful_paths
    }

    /// Records the path unless the same route is already known.
    /// Returns true if it was new.
    pub fn add_to_successful(&mut self, path: Path<IndexType>) -> bool {
        if self.known_routes.insert(path.nodes()) {
            self.successful_paths.push(path);
            true
        } else {
            false
        }
    }
}

impl<IndexType: NodeId> Success<IndexType> for UniquePaths<IndexType> {
    fn new_ant(&self) -> Self {
        UniquePaths::new(self.target)
    }

    fn accept(&mut self, edge: &EdgeData<IndexType>) -> bool {
        if self.current.push_edge(edge).is_err() {
            // the previous walk ended without a new ant, start over at this edge
            self.current = Path::new();
            let _ = self.current.push_edge(edge);
        }

        let found = edge.to == self.target;
        if found {
            let path = std::mem::take(&mut self.current);
            self.add_to_successful(path);
        }
        found
    }

    fn merge(&mut self, ant: Self) {
        for path in ant.successful_paths {
            self.add_to_successful(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decorum::R64;

    fn edge(index: usize, from: usize, to: usize) -> EdgeData<usize> {
        EdgeData {
            index,
            from,
            to,
            length: R64::from_inner(1.0),
        }
    }

    fn walk<S: Success<usize>>(success: &mut S, edges: &[EdgeData<usize>]) -> bool {
        edges.iter().any(|e| success.accept(e))
    }

    #[test]
    fn target_found_works() {
        let mut success = TargetFound::new(3).new_ant();

        assert!(!success.accept(&edge(0, 1, 2)));
        assert!(success.accept(&edge(1, 2, 3)));
    }

    #[test]
    fn node_set_found_counts_hits() {
        let targets: HashSet<usize> = vec![5, 6].into_iter().collect();
        let mut session = NodeSetFound::new(&targets);

        let mut first = session.new_ant();
        assert!(walk(&mut first, &[edge(0, 1, 2), edge(1, 2, 5)]));
        assert_eq!(first.hits(5), 1);
        let mut second = session.new_ant();
        assert!(!walk(&mut second, &[edge(0, 1, 2)]));
        let mut third = session.new_ant();
        assert!(walk(&mut third, &[edge(2, 1, 5)]));

        session.merge(first);
        session.merge(second);
        session.merge(third);
        assert_eq!(session.hits(5), 2);
        assert_eq!(session.hits(6), 0);
    }

    #[test]
    fn same_route_is_recorded_once() {
        let route = [edge(0, 1, 2), edge(1, 2, 3)];
        let mut session = UniquePaths::new(3);

        let mut first = session.new_ant();
        assert!(walk(&mut first, &route));
        session.merge(first);
        let mut second = session.new_ant();
        assert!(walk(&mut second, &route));
        session.merge(second);

        assert_eq!(session.successful_paths().len(), 1);
        assert_eq!(session.successful_paths()[0].nodes(), vec![1usize, 2, 3]);
    }

    #[test]
    fn same_route_fed_directly_is_recorded_once() {
        let route = [edge(0, 1, 2), edge(1, 2, 3)];
        let mut session = UniquePaths::new(3);

        assert!(walk(&mut session, &route));
        assert!(walk(&mut session, &route));

        assert_eq!(session.successful_paths().len(), 1);
    }

    #[test]
    fn different_routes_are_both_recorded() {
        let mut session = UniquePaths::new(3);

        assert!(walk(&mut session, &[edge(0, 1, 2), edge(1, 2, 3)]));
        assert!(walk(&mut session, &[edge(2, 1, 4), edge(3, 4, 3)]));

        assert_eq!(session.into_successful_paths().len(), 2);
    }
}
