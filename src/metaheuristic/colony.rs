mod ant;
mod message;
mod params;
mod selection;

pub use ant::{Ant, AntWalk, WalkOutcome};
pub use message::{Layer, Message, MessageInfo};
pub use params::Params;
pub use selection::{select_max_pheromone, EdgeSelection, MmasSelection, SelectedPath};

use crate::graph::{ChannelId, EdgeIndex, GraphError, NodeId, PheromoneGraph, PheromoneTrail};
use crate::metaheuristic::{Path, Success};
use crate::rng::{next_seed, rng64};

use decorum::R64;
use num_traits::identities::{One, Zero};
use oorandom::Rand64;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::debug;

/// A Max-Min ant colony anchored at a base node, reinforcing its own pheromone channel.
///
/// One iteration is a `run`, which only reads the graph, followed by an `update`, which
/// writes the colony's trail. Several colonies can run on the same graph at once.
pub struct Colony<IndexType> {
    base_node: IndexType,
    channel: ChannelId,
    params: Params,
    iteration: usize,
    rng: Rand64,
    last_paths: Vec<Path<IndexType>>,
    pending: bool,
    best_path: Option<Path<IndexType>>,
    metric: f64,
    layer: Layer,
    sender: Option<Sender<Message>>,
}

impl<IndexType: NodeId> Colony<IndexType> {
    /// Claims a fresh channel of the graph for the new colony.
    pub fn new(
        graph: &mut PheromoneGraph<IndexType>,
        base_node: IndexType,
        params: Params,
    ) -> Result<Self, GraphError<IndexType>> {
        if !graph.has_node(base_node) {
            return Err(GraphError::MissingNode(base_node));
        }
        let channel = graph.allocate_channel()?;

        Ok(Colony::with_channel(channel, base_node, params))
    }

    /// A colony on a channel the caller manages.
    pub fn with_channel(channel: ChannelId, base_node: IndexType, params: Params) -> Self {
        Colony {
            base_node,
            channel,
            params,
            iteration: 0,
            rng: rng64(params.seed),
            last_paths: Vec::new(),
            pending: false,
            best_path: None,
            metric: 0.0,
            layer: Layer::default(),
            sender: None,
        }
    }

    /// Moves the colony. Paths found from the old base node are dropped.
    pub fn set_base_node(&mut self, base_node: IndexType) {
        if base_node != self.base_node {
            self.base_node = base_node;
            self.last_paths.clear();
            self.pending = false;
            self.best_path = None;
        }
    }

    pub fn get_base_node(&self) -> IndexType {
        self.base_node
    }

    /// The pheromone channel this colony writes.
    pub fn get_id(&self) -> ChannelId {
        self.channel
    }

    /// Completed run and update cycles.
    pub fn get_iteration(&self) -> usize {
        self.iteration
    }

    /// Best success rate of a single iteration so far. Zero means no ant ever succeeded.
    pub fn get_metric(&self) -> f64 {
        self.metric
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn best_path(&self) -> Option<&Path<IndexType>> {
        self.best_path.as_ref()
    }

    /// Paths kept for reinforcement by the latest run.
    pub fn last_paths(&self) -> &[Path<IndexType>] {
        &self.last_paths
    }

    pub fn set_supervisor(&mut self, sender: Sender<Message>) {
        self.sender = Some(sender);
    }

    /// Tags the messages sent to the supervisor.
    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    /// One iteration of plain MMAS ants. Returns the number of successful ants.
    pub fn run<S>(
        &mut self,
        graph: &PheromoneGraph<IndexType>,
        success: &mut S,
    ) -> Result<usize, GraphError<IndexType>>
    where
        S: Success<IndexType>,
    {
        self.run_with(graph, &MmasSelection, success)
    }

    /// One iteration with an arbitrary edge selection strategy.
    pub fn run_with<Sel, S>(
        &mut self,
        graph: &PheromoneGraph<IndexType>,
        selection: &Sel,
        success: &mut S,
    ) -> Result<usize, GraphError<IndexType>>
    where
        Sel: EdgeSelection<IndexType>,
        S: Success<IndexType>,
    {
        if !graph.has_node(self.base_node) {
            return Err(GraphError::MissingNode(self.base_node));
        }
        graph.trail(self.channel)?;

        let start_time = Instant::now();
        let ant_count = self.params.ant_count;
        let mut ants = Vec::with_capacity(ant_count);
        for _ in 0..ant_count {
            ants.push((next_seed(&mut self.rng), success.new_ant()));
        }

        let base_node = self.base_node;
        let channel = self.channel;
        let max_steps = self.params.max_steps;
        let results: Vec<(AntWalk<IndexType>, S)> = ants
            .into_par_iter()
            .map(|(seed, ant_success)| {
                Ant::new(
                    graph,
                    selection,
                    base_node,
                    channel,
                    max_steps,
                    ant_success,
                    rng64(seed),
                )
                .walk()
            })
            .collect();

        let mut walks = Vec::with_capacity(results.len());
        for (walk, ant_success) in results {
            success.merge(ant_success);
            walks.push(walk);
        }
        let successes = walks.iter().filter(|walk| walk.succeeded()).count();
        let steps: usize = walks.iter().map(|walk| walk.path.hops()).sum();

        let selected = selection.select_paths(graph, walks);
        for candidate in selected.iter().filter(|s| s.exact) {
            self.offer_best(&candidate.path);
        }
        self.last_paths = selected.into_iter().map(|s| s.path).collect();
        self.pending = true;

        if ant_count > 0 {
            let rate = successes as f64 / ant_count as f64;
            if rate > self.metric {
                self.metric = rate;
            }
        }

        let best_length = self.best_path.as_ref().map(|p| p.length().into_inner());
        debug!(
            channel = self.channel.index(),
            iteration = self.iteration,
            successes,
            best_length = ?best_length,
            "colony iteration"
        );
        if let Some(sender) = &self.sender {
            let _ = sender.send(Message::new(
                self.layer,
                self.channel.index(),
                self.iteration,
                ant_count,
                successes,
                steps,
                best_length,
                self.metric,
                start_time.elapsed(),
            ));
        }

        Ok(successes)
    }

    /// Evaporates and reinforces this colony's trail in the graph.
    pub fn update(&mut self, graph: &mut PheromoneGraph<IndexType>) -> Result<(), GraphError<IndexType>> {
        let trail = graph.trail_mut(self.channel)?;
        self.update_trail(trail);
        Ok(())
    }

    /// Same as `update` on a trail that was borrowed from the graph beforehand.
    ///
    /// All deposits are summed per edge before they are added and capped, so the result
    /// does not depend on the order the ants finished in.
    pub fn update_trail(&mut self, trail: &mut PheromoneTrail) {
        debug_assert_eq!(trail.channel(), self.channel);
        trail.evaporate(self.params.rho);

        let mut deposits: BTreeMap<EdgeIndex, R64> = BTreeMap::new();
        if self.pending {
            let population = R64::from_inner(self.params.ant_count.max(1) as f64);
            for path in self.last_paths.iter() {
                let amount = R64::from_inner(self.params.q) / (population * (R64::one() + path.length()));
                add_deposit(&mut deposits, path, amount);
            }
        }
        if let Some(best) = &self.best_path {
            let amount = R64::from_inner(self.params.q) / (R64::one() + best.length());
            add_deposit(&mut deposits, best, amount);
        }

        for (edge, amount) in deposits {
            trail.deposit(edge, amount);
        }
        self.pending = false;
        self.iteration += 1;
    }

    fn offer_best(&mut self, candidate: &Path<IndexType>) {
        if candidate.is_empty() {
            return;
        }
        let better = match &self.best_path {
            None => true,
            Some(best) => {
                (candidate.length(), candidate.hops()) < (best.length(), best.hops())
            }
        };
        if better {
            self.best_path = Some(candidate.clone());
        }
    }
}

fn add_deposit<IndexType: NodeId>(
    deposits: &mut BTreeMap<EdgeIndex, R64>,
    path: &Path<IndexType>,
    amount: R64,
) {
    for edge in path.iter_edges() {
        *deposits.entry(edge).or_insert_with(R64::zero) += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate::{Generate, Grid, Ring};
    use crate::graph::PheromoneBounds;
    use crate::metaheuristic::TargetFound;
    use float_cmp::approx_eq;
    use std::sync::mpsc;

    fn ring(size: usize, bounds: PheromoneBounds) -> PheromoneGraph<usize> {
        Ring::new(size, 1.0)
            .generate()
            .unwrap()
            .build(1, bounds)
            .unwrap()
    }

    #[test]
    fn ring_finds_shortest_direction() {
        let mut graph = ring(10, PheromoneBounds::default());
        let mut colony = Colony::new(&mut graph, 0, Params::new(20, 12, 0.1, 1.0, Some(11))).unwrap();
        let mut success = TargetFound::new(3);

        for _ in 0..30 {
            colony.run(&graph, &mut success).unwrap();
            colony.update(&mut graph).unwrap();
        }

        assert!(colony.get_metric() > 0.0);
        assert_eq!(colony.get_iteration(), 30);
        let best = colony.best_path().unwrap();
        assert_eq!(best.nodes(), vec![0usize, 1, 2, 3]);
        assert!(approx_eq!(f64, best.length().into_inner(), 3.0));

        let channel = colony.get_id();
        let short = graph.edge_between((0, 1)).unwrap().index;
        let long = graph.edge_between((0, 9)).unwrap().index;
        assert!(graph.pheromone(short, channel) > graph.pheromone(long, channel));
    }

    #[test]
    fn pheromone_stays_within_bounds() {
        let bounds = PheromoneBounds::new(0.05, 0.6, 0.2);
        let mut weight = || 1.0;
        let mut graph = Grid::new((4, 4), &mut weight)
            .generate()
            .unwrap()
            .build(1, bounds)
            .unwrap();
        let mut colony = Colony::new(&mut graph, 0, Params::new(15, 10, 0.3, 5.0, Some(4))).unwrap();
        let mut success = TargetFound::new(15);

        for _ in 0..40 {
            colony.run(&graph, &mut success).unwrap();
            colony.update(&mut graph).unwrap();
            let trail = graph.trail(colony.get_id()).unwrap();
            assert!(trail.iter().all(|v| bounds.contains(v)));
        }
    }

    #[test]
    fn update_does_not_depend_on_path_order() {
        let graph = ring(6, PheromoneBounds::new(0.0, 10.0, 0.5));
        let channel = ChannelId::new(0);
        let forward = Path::from_edges(vec![
            graph.edge_between((0, 1)).unwrap(),
            graph.edge_between((1, 2)).unwrap(),
        ])
        .unwrap();
        let backward = Path::from_edges(vec![
            graph.edge_between((0, 5)).unwrap(),
            graph.edge_between((5, 4)).unwrap(),
            graph.edge_between((4, 3)).unwrap(),
        ])
        .unwrap();
        let shared = Path::from_edges(vec![graph.edge_between((0, 1)).unwrap()]).unwrap();

        let mut trails = Vec::new();
        for order in &[
            vec![forward.clone(), backward.clone(), shared.clone()],
            vec![shared.clone(), backward.clone(), forward.clone()],
        ] {
            let mut colony = Colony::with_channel(channel, 0, Params::new(3, 5, 0.2, 1.0, Some(0)));
            colony.last_paths = order.clone();
            colony.pending = true;
            let mut trail = graph.trail(channel).unwrap().clone();
            colony.update_trail(&mut trail);
            trails.push(trail);
        }

        for (a, b) in trails[0].iter().zip(trails[1].iter()) {
            assert!(approx_eq!(f64, a.into_inner(), b.into_inner(), ulps = 4));
        }
        let edge = graph.edge_between((0, 1)).unwrap().index;
        assert!(trails[0].get(edge) > R64::from_inner(0.4));
    }

    #[test]
    fn missing_base_node_is_rejected() {
        let mut graph = ring(4, PheromoneBounds::default());

        assert!(matches!(
            Colony::new(&mut graph, 42, Params::default()),
            Err(GraphError::MissingNode(42))
        ));
    }

    #[test]
    fn moving_the_base_node_drops_paths() {
        let mut graph = ring(5, PheromoneBounds::default());
        let mut colony = Colony::new(&mut graph, 0, Params::new(5, 5, 0.1, 1.0, Some(2))).unwrap();
        colony.run(&graph, &mut TargetFound::new(1)).unwrap();
        assert!(colony.best_path().is_some());

        colony.set_base_node(2);
        assert_eq!(colony.get_base_node(), 2);
        assert!(colony.best_path().is_none());
        assert!(colony.last_paths().is_empty());
    }

    #[test]
    fn supervisor_receives_messages() {
        let mut graph = ring(5, PheromoneBounds::default());
        let mut colony = Colony::new(&mut graph, 0, Params::new(4, 5, 0.1, 1.0, Some(2))).unwrap();
        let (sender, receiver) = mpsc::channel();
        colony.set_supervisor(sender);
        colony.run(&graph, &mut TargetFound::new(2)).unwrap();

        let message = receiver.try_recv().unwrap();
        assert_eq!(message.ants, 4);
        assert_eq!(message.successes, 4);
        assert_eq!(message.iteration, 0);
        assert_eq!(message.layer, Layer::Graph);
    }
}
