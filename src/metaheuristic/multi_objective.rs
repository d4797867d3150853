mod objective;

pub use objective::{Objective, ObjectiveSession};

use crate::graph::{ChannelId, EdgeIndex, GraphError, NodeId, PheromoneGraph};
use crate::metaheuristic::colony::{
    select_max_pheromone, AntWalk, Colony, EdgeSelection, Message, Params, SelectedPath,
};
use crate::metaheuristic::{Path, Success};

use decorum::R64;
use oorandom::Rand64;
use std::sync::mpsc::Sender;

/// Pheromone an objective's channel needs on an edge before ants notice it.
///
/// Trails never drop below their `pheromone_min`. With a minimum above this threshold
/// every edge counts as marked by the first objective, ants never fall back to the
/// colony's own channel and equally marked edges go to the first feasible one.
pub const OBJECTIVE_THRESHOLD: f64 = 0.01;

/// Smallest objective index whose channel marks the edge, with the intensity found there.
fn objective_rank<IndexType: NodeId>(
    graph: &PheromoneGraph<IndexType>,
    edge: EdgeIndex,
    objectives: &[Objective<IndexType>],
) -> Option<(usize, R64)> {
    objectives.iter().enumerate().find_map(|(k, objective)| {
        let intensity = graph.pheromone(edge, objective.channel);
        if intensity.into_inner() > OBJECTIVE_THRESHOLD {
            Some((k, intensity))
        } else {
            None
        }
    })
}

fn outranks(candidate: (usize, R64), current: (usize, R64)) -> bool {
    candidate.0 < current.0 || (candidate.0 == current.0 && candidate.1 > current.1)
}

/// The edge marked by the most important objective, stronger pheromone deciding between
/// edges of the same objective. Returns the edge and the objective's index.
pub fn best_objective_edge<IndexType: NodeId>(
    graph: &PheromoneGraph<IndexType>,
    edges: &[EdgeIndex],
    objectives: &[Objective<IndexType>],
) -> Option<(EdgeIndex, usize)> {
    let mut best: Option<(EdgeIndex, (usize, R64))> = None;
    for &edge in edges {
        if let Some(rank) = objective_rank(graph, edge, objectives) {
            if best.map_or(true, |(_, current)| outranks(rank, current)) {
                best = Some((edge, rank));
            }
        }
    }
    best.map(|(edge, (k, _))| (edge, k))
}

/// Forgets everything less important than objective `k` once the ant follows it.
/// Arriving at objective `k`'s target also retires the objective right before it,
/// or objective 0 itself when there is none.
pub fn retire_objectives<IndexType: NodeId>(
    objectives: &mut Vec<Objective<IndexType>>,
    k: usize,
    destination: IndexType,
) {
    if k >= objectives.len() {
        return;
    }
    objectives.truncate(k + 1);
    if objectives[k].target == destination {
        objectives.remove(k.saturating_sub(1));
    }
}

/// Edge selection that follows the pheromone of the session's objectives and falls back
/// to the colony's own channel where none of them is present.
pub struct MultiObjectiveSelection<'s, IndexType> {
    session: &'s ObjectiveSession<IndexType>,
}

impl<'s, IndexType: NodeId> MultiObjectiveSelection<'s, IndexType> {
    pub fn new(session: &'s ObjectiveSession<IndexType>) -> Self {
        MultiObjectiveSelection { session }
    }
}

impl<'s, IndexType: NodeId> EdgeSelection<IndexType> for MultiObjectiveSelection<'s, IndexType> {
    type AntState = Vec<Objective<IndexType>>;

    fn new_ant(&self) -> Self::AntState {
        self.session.objectives().to_vec()
    }

    fn select_edge(
        &self,
        state: &mut Self::AntState,
        graph: &PheromoneGraph<IndexType>,
        feasible: &[EdgeIndex],
        channel: ChannelId,
        rng: &mut Rand64,
    ) -> EdgeIndex {
        match best_objective_edge(graph, feasible, state) {
            Some((edge, k)) => {
                retire_objectives(state, k, graph.edge(edge).to);
                edge
            }
            None => select_max_pheromone(graph, feasible, channel, rng),
        }
    }

    fn finished(&self, state: &Self::AntState) -> bool {
        state.is_empty()
    }

    /// Walks ending at the first objective's target are kept whole. Of all other walks
    /// only the prefix leading up to the best marked edge of the iteration is kept.
    fn select_paths(
        &self,
        graph: &PheromoneGraph<IndexType>,
        walks: Vec<AntWalk<IndexType>>,
    ) -> Vec<SelectedPath<IndexType>> {
        let objectives = self.session.objectives();
        let first_target = match objectives.first() {
            Some(objective) => objective.target,
            None => {
                return walks
                    .into_iter()
                    .filter(|walk| walk.succeeded())
                    .map(|walk| SelectedPath::exact(walk.path))
                    .collect()
            }
        };

        let mut selected = Vec::new();
        let mut partial: Option<(Path<IndexType>, (usize, R64))> = None;
        for walk in walks {
            if walk.path.is_empty() {
                continue;
            }
            if walk.path.end() == Some(first_target) {
                selected.push(SelectedPath::exact(walk.path));
                continue;
            }
            for (position, edge) in walk.path.iter_edges().enumerate() {
                if let Some(rank) = objective_rank(graph, edge, objectives) {
                    if partial.as_ref().map_or(true, |(_, current)| outranks(rank, *current)) {
                        partial = Some((walk.path.prefix(position + 1, graph), rank));
                    }
                }
            }
        }

        if let Some((path, _)) = partial {
            selected.push(SelectedPath::partial(path));
        }
        selected
    }
}

/// A colony whose ants are steered by an objective session.
pub struct MultiObjectiveColony<IndexType> {
    colony: Colony<IndexType>,
}

impl<IndexType: NodeId> MultiObjectiveColony<IndexType> {
    pub fn new(
        graph: &mut PheromoneGraph<IndexType>,
        base_node: IndexType,
        params: Params,
    ) -> Result<Self, GraphError<IndexType>> {
        Ok(MultiObjectiveColony {
            colony: Colony::new(graph, base_node, params)?,
        })
    }

    pub fn run<S>(
        &mut self,
        graph: &PheromoneGraph<IndexType>,
        session: &ObjectiveSession<IndexType>,
        success: &mut S,
    ) -> Result<usize, GraphError<IndexType>>
    where
        S: Success<IndexType>,
    {
        session.validate(graph)?;
        self.colony
            .run_with(graph, &MultiObjectiveSelection::new(session), success)
    }

    pub fn update(&mut self, graph: &mut PheromoneGraph<IndexType>) -> Result<(), GraphError<IndexType>> {
        self.colony.update(graph)
    }

    pub fn set_base_node(&mut self, base_node: IndexType) {
        self.colony.set_base_node(base_node)
    }

    pub fn get_base_node(&self) -> IndexType {
        self.colony.get_base_node()
    }

    pub fn get_id(&self) -> ChannelId {
        self.colony.get_id()
    }

    pub fn get_iteration(&self) -> usize {
        self.colony.get_iteration()
    }

    pub fn get_metric(&self) -> f64 {
        self.colony.get_metric()
    }

    /// Best path that ended at the first objective's target.
    pub fn best_path(&self) -> Option<&Path<IndexType>> {
        self.colony.best_path()
    }

    pub fn last_paths(&self) -> &[Path<IndexType>] {
        self.colony.last_paths()
    }

    pub fn set_supervisor(&mut self, sender: Sender<Message>) {
        self.colony.set_supervisor(sender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, PheromoneBounds};
    use crate::metaheuristic::colony::{Ant, WalkOutcome};
    use crate::metaheuristic::TargetFound;
    use crate::rng::rng64;

    /// 0 -> 1 (A), 0 -> 2 (B), 1 -> 3, 2 -> 3 with three channels.
    fn fork() -> PheromoneGraph<usize> {
        let mut builder = GraphBuilder::new();
        for id in 0..4 {
            builder.add_node(id);
        }
        builder.add_edge((0, 1), 1.0).unwrap();
        builder.add_edge((0, 2), 1.0).unwrap();
        builder.add_edge((1, 3), 1.0).unwrap();
        builder.add_edge((2, 3), 1.0).unwrap();
        builder.build(3, PheromoneBounds::default()).unwrap()
    }

    fn objective(target: usize, channel: usize, priority: f64) -> Objective<usize> {
        Objective::new(target, ChannelId::new(channel), priority)
    }

    fn walk(graph: &PheromoneGraph<usize>, nodes: &[usize], outcome: WalkOutcome) -> AntWalk<usize> {
        let edges: Vec<_> = nodes
            .windows(2)
            .map(|pair| graph.edge_between((pair[0], pair[1])).unwrap())
            .collect();
        AntWalk {
            path: Path::from_edges(edges).unwrap(),
            outcome,
        }
    }

    #[test]
    fn more_important_objective_wins_over_intensity() {
        let mut graph = fork();
        let a = graph.edge_between((0, 1)).unwrap().index;
        let b = graph.edge_between((0, 2)).unwrap().index;
        graph.deposit(a, ChannelId::new(0), R64::from_inner(0.5)).unwrap();
        graph.deposit(b, ChannelId::new(1), R64::from_inner(0.8)).unwrap();
        let mut session = ObjectiveSession::new();
        session.set_objectives(vec![objective(9, 0, 2.0), objective(8, 1, 1.0)]);
        let selection = MultiObjectiveSelection::new(&session);
        let mut state = selection.new_ant();

        let picked = selection.select_edge(&mut state, &graph, &[a, b], ChannelId::new(2), &mut rng64(0));
        assert_eq!(picked, a);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn stronger_pheromone_wins_within_an_objective() {
        let mut graph = fork();
        let a = graph.edge_between((0, 1)).unwrap().index;
        let b = graph.edge_between((0, 2)).unwrap().index;
        graph.deposit(a, ChannelId::new(0), R64::from_inner(0.3)).unwrap();
        graph.deposit(b, ChannelId::new(0), R64::from_inner(0.4)).unwrap();
        let objectives = vec![objective(9, 0, 1.0)];

        assert_eq!(best_objective_edge(&graph, &[a, b], &objectives), Some((b, 0)));
    }

    #[test]
    fn faint_pheromone_is_ignored() {
        let mut graph = fork();
        let a = graph.edge_between((0, 1)).unwrap().index;
        graph.deposit(a, ChannelId::new(0), R64::from_inner(0.005)).unwrap();
        let objectives = vec![objective(9, 0, 1.0)];

        assert_eq!(best_objective_edge(&graph, &[a], &objectives), None);
    }

    #[test]
    fn unmarked_edges_follow_the_colony_channel() {
        let mut graph = fork();
        let a = graph.edge_between((0, 1)).unwrap().index;
        let b = graph.edge_between((0, 2)).unwrap().index;
        graph.deposit(a, ChannelId::new(0), R64::from_inner(0.005)).unwrap();
        graph.deposit(a, ChannelId::new(2), R64::from_inner(0.3)).unwrap();
        graph.deposit(b, ChannelId::new(2), R64::from_inner(0.6)).unwrap();
        let mut session = ObjectiveSession::new();
        session.set_objectives(vec![objective(9, 0, 1.0)]);
        let selection = MultiObjectiveSelection::new(&session);
        let mut state = selection.new_ant();

        for seed in 0..10 {
            let picked = selection.select_edge(&mut state, &graph, &[a, b], ChannelId::new(2), &mut rng64(seed));
            assert_eq!(picked, b);
        }
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn minimum_above_threshold_marks_every_edge() {
        let mut builder = GraphBuilder::new();
        for id in 0..3 {
            builder.add_node(id);
        }
        builder.add_edge((0, 1), 1.0).unwrap();
        builder.add_edge((0, 2), 1.0).unwrap();
        let graph = builder.build(2, PheromoneBounds::new(0.05, 1.0, 0.05)).unwrap();
        let a = graph.edge_between((0, 1)).unwrap().index;
        let b = graph.edge_between((0, 2)).unwrap().index;
        let objectives = vec![objective(9, 0, 1.0)];

        assert_eq!(best_objective_edge(&graph, &[a, b], &objectives), Some((a, 0)));
        assert_eq!(best_objective_edge(&graph, &[b, a], &objectives), Some((b, 0)));
    }

    #[test]
    fn reaching_a_waypoint_retires_its_predecessor() {
        let mut objectives = vec![objective(5, 0, 3.0), objective(6, 1, 2.0), objective(7, 2, 1.0)];
        let expected = objectives[1];
        retire_objectives(&mut objectives, 1, 6);

        assert_eq!(objectives, vec![expected]);
    }

    #[test]
    fn following_without_arriving_only_truncates() {
        let mut objectives = vec![objective(5, 0, 3.0), objective(6, 1, 2.0), objective(7, 2, 1.0)];
        retire_objectives(&mut objectives, 1, 4);

        assert_eq!(objectives.len(), 2);
    }

    #[test]
    fn reaching_the_first_objective_drains_the_list() {
        let mut objectives = vec![objective(5, 0, 3.0), objective(6, 1, 2.0)];
        retire_objectives(&mut objectives, 0, 5);

        assert!(objectives.is_empty());
    }

    #[test]
    fn exact_and_partial_paths_are_selected() {
        let mut graph = fork();
        let weak = graph.edge_between((0, 1)).unwrap().index;
        let strong = graph.edge_between((0, 2)).unwrap().index;
        graph.deposit(weak, ChannelId::new(1), R64::from_inner(0.2)).unwrap();
        graph.deposit(strong, ChannelId::new(1), R64::from_inner(0.7)).unwrap();
        let mut session = ObjectiveSession::new();
        session.set_objectives(vec![objective(3, 0, 2.0), objective(9, 1, 1.0)]);
        let selection = MultiObjectiveSelection::new(&session);

        let walks = vec![
            walk(&graph, &[0, 1, 3], WalkOutcome::Succeeded),
            walk(&graph, &[0, 1], WalkOutcome::Exhausted),
            walk(&graph, &[0, 2], WalkOutcome::Exhausted),
        ];
        let selected = selection.select_paths(&graph, walks);

        assert_eq!(selected.len(), 2);
        assert!(selected[0].exact);
        assert_eq!(selected[0].path.nodes(), vec![0usize, 1, 3]);
        assert!(!selected[1].exact);
        assert_eq!(selected[1].path.nodes(), vec![0usize, 2]);
    }

    #[test]
    fn drained_objectives_end_the_walk_successfully() {
        let mut graph = fork();
        let b = graph.edge_between((0, 2)).unwrap().index;
        graph.deposit(b, ChannelId::new(0), R64::from_inner(0.5)).unwrap();
        let mut session = ObjectiveSession::new();
        session.set_objectives(vec![objective(2, 0, 1.0)]);
        let selection = MultiObjectiveSelection::new(&session);

        let ant = Ant::new(&graph, &selection, 0, ChannelId::new(2), 5, TargetFound::new(3), rng64(4));
        let (walk, _) = ant.walk();

        assert_eq!(walk.outcome, WalkOutcome::Succeeded);
        assert_eq!(walk.path.nodes(), vec![0usize, 2]);
    }

    #[test]
    fn colony_follows_objectives_to_the_target() {
        let mut graph = fork();
        let guide = graph.allocate_channel().unwrap();
        for &(from, to) in &[(0, 2), (2, 3)] {
            let edge = graph.edge_between((from, to)).unwrap().index;
            graph.deposit(edge, guide, R64::from_inner(0.9)).unwrap();
        }
        let mut colony = MultiObjectiveColony::new(&mut graph, 0, Params::new(10, 5, 0.1, 1.0, Some(1))).unwrap();
        let mut session = ObjectiveSession::new();
        session.set_objectives(vec![Objective::new(3, guide, 1.0)]);

        for _ in 0..3 {
            colony.run(&graph, &session, &mut TargetFound::new(3)).unwrap();
            colony.update(&mut graph).unwrap();
        }

        assert_eq!(colony.get_metric(), 1.0);
        assert_eq!(colony.best_path().unwrap().nodes(), vec![0usize, 2, 3]);
    }

    #[test]
    fn unknown_objective_channel_is_rejected() {
        let mut graph = fork();
        let mut colony = MultiObjectiveColony::new(&mut graph, 0, Params::default()).unwrap();
        let mut session = ObjectiveSession::new();
        session.set_objectives(vec![objective(3, 7, 1.0)]);

        assert_eq!(
            colony.run(&graph, &session, &mut TargetFound::new(3)),
            Err(GraphError::MissingChannel(7))
        );
    }
}
