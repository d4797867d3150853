mod neighbour_colony;

pub use neighbour_colony::NeighbourColony;

use crate::graph::{ChannelId, GraphError, NodeId, PheromoneGraph, PheromoneTrail};
use crate::metaheuristic::colony::{Message, Params};
use crate::rng::{next_seed, rand_index};

use oorandom::Rand64;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::mpsc::Sender;

/// Colonies spread over the graph, each one learning how well it reaches the others.
pub struct Neighbourhood<IndexType> {
    colonies: Vec<NeighbourColony<IndexType>>,
    iteration: usize,
}

impl<IndexType: NodeId> Neighbourhood<IndexType> {
    /// Places up to `n_colonies` colonies on distinct random nodes, one channel each.
    pub fn new(
        graph: &mut PheromoneGraph<IndexType>,
        n_colonies: usize,
        params: Params,
        rng: &mut Rand64,
    ) -> Result<Self, GraphError<IndexType>> {
        let mut candidates = graph.node_ids();
        let n_colonies = n_colonies.min(candidates.len());
        // partial Fisher-Yates, the first n_colonies entries end up sampled
        for i in 0..n_colonies {
            let j = i + rand_index(rng, candidates.len() - i);
            candidates.swap(i, j);
        }
        candidates.truncate(n_colonies);

        Neighbourhood::from_base_nodes(graph, candidates, params, rng)
    }

    pub fn from_base_nodes(
        graph: &mut PheromoneGraph<IndexType>,
        base_nodes: Vec<IndexType>,
        params: Params,
        rng: &mut Rand64,
    ) -> Result<Self, GraphError<IndexType>> {
        let mut colonies = Vec::with_capacity(base_nodes.len());
        for &base_node in base_nodes.iter() {
            colonies.push(NeighbourColony::new(
                graph,
                base_node,
                base_nodes.clone(),
                params.reseeded(next_seed(rng)),
            )?);
        }

        Ok(Neighbourhood {
            colonies,
            iteration: 0,
        })
    }

    /// Runs one iteration of every colony at once.
    pub fn run(&mut self, graph: &PheromoneGraph<IndexType>) -> Result<(), GraphError<IndexType>> {
        self.colonies
            .par_iter_mut()
            .map(|colony| colony.run(graph))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(())
    }

    /// Updates the trails of all colonies at once and refreshes the proximity matrix.
    pub fn update(&mut self, graph: &mut PheromoneGraph<IndexType>) -> Result<(), GraphError<IndexType>> {
        let pairs = pair_with_trails(self.colonies.iter_mut(), graph.trails_mut())?;
        pairs
            .into_par_iter()
            .for_each(|(colony, trail)| colony.update_trail(trail));
        self.iteration += 1;
        Ok(())
    }

    /// Row `i` holds colony `i`'s proximity to every base node.
    pub fn get_proximity_matrix(&self) -> Vec<Vec<f64>> {
        self.colonies
            .iter()
            .map(|colony| colony.get_proximity_vector().to_vec())
            .collect()
    }

    pub fn get_colonies(&self) -> &[NeighbourColony<IndexType>] {
        &self.colonies
    }

    pub fn get_iteration(&self) -> usize {
        self.iteration
    }

    pub fn get_base_nodes(&self) -> Vec<IndexType> {
        self.colonies.iter().map(|c| c.get_base_node()).collect()
    }

    pub fn len(&self) -> usize {
        self.colonies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colonies.is_empty()
    }

    /// Which channel carries the pheromone leading away from each base node.
    pub fn channel_map(&self) -> HashMap<IndexType, ChannelId> {
        self.colonies
            .iter()
            .map(|c| (c.get_base_node(), c.get_id()))
            .collect()
    }

    pub fn set_supervisor(&mut self, sender: &Sender<Message>) {
        for colony in self.colonies.iter_mut() {
            colony.set_supervisor(sender.clone());
        }
    }
}

/// Hands every colony the trail of its own channel.
/// Two colonies on the same channel are refused.
pub fn pair_with_trails<'c, 't, IndexType, I>(
    colonies: I,
    trails: &'t mut [PheromoneTrail],
) -> Result<Vec<(&'c mut NeighbourColony<IndexType>, &'t mut PheromoneTrail)>, GraphError<IndexType>>
where
    IndexType: NodeId + 'c,
    I: IntoIterator<Item = &'c mut NeighbourColony<IndexType>>,
{
    let mut slots: Vec<Option<&'t mut PheromoneTrail>> = trails.iter_mut().map(Some).collect();
    let mut pairs = Vec::new();
    for colony in colonies {
        let index = colony.get_id().index();
        let trail = match slots.get_mut(index) {
            None => return Err(GraphError::MissingChannel(index)),
            Some(slot) => slot.take().ok_or(GraphError::ChannelInUse(index))?,
        };
        pairs.push((colony, trail));
    }
    Ok(pairs)
}
