use crate::graph::{ChannelId, EdgeIndex, NodeId, PheromoneGraph};
use crate::metaheuristic::colony::AntWalk;
use crate::metaheuristic::Path;
use crate::rng::rand_index;

use decorum::R64;
use float_cmp::approx_eq;
use num_traits::identities::Zero;
use oorandom::Rand64;

/// A path chosen for reinforcement after an iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPath<IndexType> {
    pub path: Path<IndexType>,
    /// Only exact paths are candidates for the colony's best path.
    pub exact: bool,
}

impl<IndexType> SelectedPath<IndexType> {
    pub fn exact(path: Path<IndexType>) -> Self {
        SelectedPath { path, exact: true }
    }

    pub fn partial(path: Path<IndexType>) -> Self {
        SelectedPath { path, exact: false }
    }
}

/// How ants pick their next edge and which walks a colony reinforces.
pub trait EdgeSelection<IndexType: NodeId>: Sync {
    /// What every ant carries along its walk.
    type AntState: Send;

    fn new_ant(&self) -> Self::AntState;

    /// Picks one of the feasible edges, which are never empty.
    fn select_edge(
        &self,
        state: &mut Self::AntState,
        graph: &PheromoneGraph<IndexType>,
        feasible: &[EdgeIndex],
        channel: ChannelId,
        rng: &mut Rand64,
    ) -> EdgeIndex;

    /// Ends the walk successfully regardless of the success predicate.
    fn finished(&self, _state: &Self::AntState) -> bool {
        false
    }

    fn select_paths(
        &self,
        _graph: &PheromoneGraph<IndexType>,
        walks: Vec<AntWalk<IndexType>>,
    ) -> Vec<SelectedPath<IndexType>> {
        walks
            .into_iter()
            .filter(|walk| walk.succeeded())
            .map(|walk| SelectedPath::exact(walk.path))
            .collect()
    }
}

/// Max-Min rule on the colony's own channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct MmasSelection;

impl<IndexType: NodeId> EdgeSelection<IndexType> for MmasSelection {
    type AntState = ();

    fn new_ant(&self) -> Self::AntState {}

    fn select_edge(
        &self,
        _state: &mut Self::AntState,
        graph: &PheromoneGraph<IndexType>,
        feasible: &[EdgeIndex],
        channel: ChannelId,
        rng: &mut Rand64,
    ) -> EdgeIndex {
        select_max_pheromone(graph, feasible, channel, rng)
    }
}

/// Edge with the most pheromone on the channel, equal maxima are drawn uniformly.
/// Without any positive pheromone every feasible edge is equally likely.
pub fn select_max_pheromone<IndexType: NodeId>(
    graph: &PheromoneGraph<IndexType>,
    feasible: &[EdgeIndex],
    channel: ChannelId,
    rng: &mut Rand64,
) -> EdgeIndex {
    debug_assert!(!feasible.is_empty());
    let best = match feasible.iter().map(|&e| graph.pheromone(e, channel)).max() {
        Some(best) if best > R64::zero() => best.into_inner(),
        _ => return feasible[rand_index(rng, feasible.len())],
    };

    let candidates: Vec<EdgeIndex> = feasible
        .iter()
        .copied()
        .filter(|&e| approx_eq!(f64, graph.pheromone(e, channel).into_inner(), best, ulps = 4))
        .collect();
    candidates[rand_index(rng, candidates.len())]
}
