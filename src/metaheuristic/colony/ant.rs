use crate::graph::{ChannelId, NodeId, PheromoneGraph};
use crate::metaheuristic::colony::EdgeSelection;
use crate::metaheuristic::{Path, Success};

use oorandom::Rand64;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    Succeeded,
    /// Dead end or step limit reached.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AntWalk<IndexType> {
    pub path: Path<IndexType>,
    pub outcome: WalkOutcome,
}

impl<IndexType> AntWalk<IndexType> {
    pub fn succeeded(&self) -> bool {
        self.outcome == WalkOutcome::Succeeded
    }
}

/// A single ant. It only reads the graph, so all ants of an iteration can walk at once.
pub struct Ant<'a, IndexType, Sel, S>
where
    Sel: EdgeSelection<IndexType>,
    IndexType: NodeId,
{
    graph: &'a PheromoneGraph<IndexType>,
    selection: &'a Sel,
    base_node: IndexType,
    channel: ChannelId,
    max_steps: usize,
    success: S,
    rng: Rand64,
}

impl<'a, IndexType, Sel, S> Ant<'a, IndexType, Sel, S>
where
    IndexType: NodeId,
    Sel: EdgeSelection<IndexType>,
    S: Success<IndexType>,
{
    pub fn new(
        graph: &'a PheromoneGraph<IndexType>,
        selection: &'a Sel,
        base_node: IndexType,
        channel: ChannelId,
        max_steps: usize,
        success: S,
        rng: Rand64,
    ) -> Self {
        Ant {
            graph,
            selection,
            base_node,
            channel,
            max_steps,
            success,
            rng,
        }
    }

    /// Walks from the base node without revisiting nodes until the success predicate
    /// or the selection strategy is satisfied, no unvisited neighbour is left or
    /// `max_steps` edges were taken. Hands the predicate back for merging.
    pub fn walk(mut self) -> (AntWalk<IndexType>, S) {
        let mut state = self.selection.new_ant();
        let mut visited = HashSet::new();
        visited.insert(self.base_node);
        let mut path = Path::starting_at(self.base_node);
        let mut current = self.base_node;
        let mut succeeded = false;

        while !succeeded && path.hops() < self.max_steps {
            let feasible = match self.graph.feasible_edges(current, &visited) {
                Ok(feasible) if !feasible.is_empty() => feasible,
                _ => break,
            };
            let index = self.selection.select_edge(
                &mut state,
                self.graph,
                &feasible,
                self.channel,
                &mut self.rng,
            );
            let edge = self.graph.edge(index);
            if path.push_edge(edge).is_err() {
                break;
            }
            current = edge.to;
            visited.insert(current);
            succeeded = self.success.accept(edge) || self.selection.finished(&state);
        }

        let outcome = if succeeded {
            WalkOutcome::Succeeded
        } else {
            WalkOutcome::Exhausted
        };
        (AntWalk { path, outcome }, self.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate::{Generate, Grid};
    use crate::graph::PheromoneBounds;
    use crate::metaheuristic::colony::MmasSelection;
    use crate::metaheuristic::TargetFound;
    use crate::rng::rng64;

    fn grid() -> PheromoneGraph<usize> {
        let mut weight = || 1.0;
        Grid::new((6, 6), &mut weight)
            .generate()
            .unwrap()
            .build(1, PheromoneBounds::default())
            .unwrap()
    }

    #[test]
    fn walks_are_acyclic_and_bounded() {
        let graph = grid();
        for seed in 0..50 {
            let ant = Ant::new(
                &graph,
                &MmasSelection,
                0,
                ChannelId::new(0),
                7,
                TargetFound::new(usize::MAX),
                rng64(seed),
            );
            let (walk, _) = ant.walk();
            let nodes = walk.path.nodes();
            let unique: HashSet<usize> = nodes.iter().copied().collect();

            assert!(walk.path.hops() <= 7);
            assert_eq!(unique.len(), nodes.len());
            assert_eq!(walk.path.start(), Some(0));
            assert!(!walk.succeeded());
        }
    }

    #[test]
    fn walk_stops_at_target() {
        let graph = grid();
        let ant = Ant::new(
            &graph,
            &MmasSelection,
            0,
            ChannelId::new(0),
            100,
            TargetFound::new(1),
            rng64(5),
        );
        let (walk, _) = ant.walk();

        if walk.succeeded() {
            assert_eq!(walk.path.end(), Some(1));
        } else {
            assert!(!walk.path.contains_node(1));
        }
    }

    #[test]
    fn dead_end_exhausts() {
        let mut builder = crate::graph::GraphBuilder::new();
        builder.add_node(0usize);
        builder.add_node(1);
        builder.add_edge((0, 1), 1.0).unwrap();
        let graph = builder.build(1, PheromoneBounds::default()).unwrap();
        let ant = Ant::new(
            &graph,
            &MmasSelection,
            0,
            ChannelId::new(0),
            10,
            TargetFound::new(7),
            rng64(0),
        );
        let (walk, _) = ant.walk();

        assert_eq!(walk.outcome, WalkOutcome::Exhausted);
        assert_eq!(walk.path.nodes(), vec![0usize, 1]);
    }
}
