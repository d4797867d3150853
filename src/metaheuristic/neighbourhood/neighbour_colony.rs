use crate::graph::{ChannelId, GraphError, NodeId, PheromoneGraph, PheromoneTrail};
use crate::metaheuristic::colony::{Colony, Message, Params};
use crate::metaheuristic::{NodeSetFound, Path};

use std::collections::HashSet;
use std::sync::mpsc::Sender;

/// A colony that looks for a list of target nodes and keeps track of how often its ants
/// reach each one of them.
pub struct NeighbourColony<IndexType> {
    colony: Colony<IndexType>,
    targets: Vec<IndexType>,
    target_set: HashSet<IndexType>,
    hits: Vec<usize>,
    proximity: Vec<f64>,
}

impl<IndexType: NodeId> NeighbourColony<IndexType> {
    /// Its own base node is never a target, even if it is part of the list.
    pub fn new(
        graph: &mut PheromoneGraph<IndexType>,
        base_node: IndexType,
        targets: Vec<IndexType>,
        params: Params,
    ) -> Result<Self, GraphError<IndexType>> {
        let colony = Colony::new(graph, base_node, params)?;
        let target_set = targets.iter().copied().filter(|&t| t != base_node).collect();

        Ok(NeighbourColony {
            colony,
            hits: vec![0; targets.len()],
            proximity: vec![0.0; targets.len()],
            targets,
            target_set,
        })
    }

    /// One iteration, counting which targets were found.
    pub fn run(&mut self, graph: &PheromoneGraph<IndexType>) -> Result<usize, GraphError<IndexType>> {
        let mut success = NodeSetFound::new(&self.target_set);
        let successes = self.colony.run(graph, &mut success)?;
        for (hits, &target) in self.hits.iter_mut().zip(self.targets.iter()) {
            *hits = success.hits(target);
        }
        Ok(successes)
    }

    pub fn update(&mut self, graph: &mut PheromoneGraph<IndexType>) -> Result<(), GraphError<IndexType>> {
        self.colony.update(graph)?;
        self.refresh_proximity();
        Ok(())
    }

    pub fn update_trail(&mut self, trail: &mut PheromoneTrail) {
        self.colony.update_trail(trail);
        self.refresh_proximity();
    }

    /// Moves the share of ants that reached each target into the proximity vector,
    /// with the colony's evaporation rate as smoothing factor.
    fn refresh_proximity(&mut self) {
        let rho = self.colony.params().rho;
        let population = self.colony.params().ant_count.max(1) as f64;
        for (proximity, &hits) in self.proximity.iter_mut().zip(self.hits.iter()) {
            let value = (1.0 - rho) * *proximity + rho * hits as f64 / population;
            *proximity = value.max(0.0).min(1.0);
        }
        for hits in self.hits.iter_mut() {
            *hits = 0;
        }
    }

    pub fn get_base_node(&self) -> IndexType {
        self.colony.get_base_node()
    }

    pub fn get_id(&self) -> ChannelId {
        self.colony.get_id()
    }

    pub fn get_metric(&self) -> f64 {
        self.colony.get_metric()
    }

    pub fn get_iteration(&self) -> usize {
        self.colony.get_iteration()
    }

    /// Proximity to every target, in the order the targets were given.
    pub fn get_proximity_vector(&self) -> &[f64] {
        &self.proximity
    }

    pub fn best_path(&self) -> Option<&Path<IndexType>> {
        self.colony.best_path()
    }

    pub fn set_supervisor(&mut self, sender: Sender<Message>) {
        self.colony.set_supervisor(sender)
    }
}
